//! Home page — the last known server time.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};

use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: Option<u64>,
    current_time: Option<String>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — current time, or a placeholder until one is known.
pub async fn index<BS, PS, CS>(State(state): State<AppState<BS, PS, CS>>) -> HomeTemplate
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    let current_time = state
        .time_service
        .current_time()
        .await
        .map(|time| time.to_string());

    HomeTemplate {
        refresh_seconds: state.time_service.refresh_hint(),
        current_time,
    }
}
