//! Server-side rendered HTML pages (no JavaScript).

pub mod blogs;
pub mod home;
pub mod pokemon;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};
use minisite_domain::view::DetailView;

use crate::state::AppState;

/// Reload interval of a detail page whose first fetch is still running.
const LOADING_REFRESH_SECONDS: u64 = 1;

/// Build the sub-router for SSR HTML pages.
pub fn routes<BS, PS, CS>() -> Router<AppState<BS, PS, CS>>
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<BS, PS, CS>))
        .route("/blogs", get(blogs::list::<BS, PS, CS>))
        .route("/blogs/{id}", get(blogs::detail::<BS, PS, CS>))
        .route("/pokemon", get(pokemon::list::<BS, PS, CS>))
        .route("/pokemon/{id}", get(pokemon::detail::<BS, PS, CS>))
}

/// Where the back link of a detail page points.
///
/// The `Referer` when it is a page of this site, `fallback` otherwise.
pub(crate) fn back_href(headers: &HeaderMap, fallback: &str) -> String {
    let Some(referer) = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
    else {
        return fallback.to_string();
    };

    if referer.starts_with('/') && !referer.starts_with("//") {
        return referer.to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let rest = referer
        .strip_prefix("https://")
        .or_else(|| referer.strip_prefix("http://"));

    match (host, rest) {
        (Some(host), Some(rest)) => {
            let (authority, path) = rest.find('/').map_or((rest, "/"), |at| rest.split_at(at));
            if authority.eq_ignore_ascii_case(host) && !path.starts_with("//") {
                path.to_string()
            } else {
                fallback.to_string()
            }
        }
        _ => fallback.to_string(),
    }
}

/// Status code of a rendered detail view.
pub(crate) fn detail_status<T>(view: &DetailView<T>) -> StatusCode {
    match view {
        DetailView::NotFound => StatusCode::NOT_FOUND,
        DetailView::Loading | DetailView::Error(_) | DetailView::Ready(_) => StatusCode::OK,
    }
}

/// Reload interval of a detail page: quick while loading, the loader's own
/// interval otherwise.
pub(crate) fn detail_refresh<T>(view: &DetailView<T>, hint: Option<u64>) -> Option<u64> {
    if view.is_loading() {
        Some(LOADING_REFRESH_SECONDS)
    } else {
        hint
    }
}
