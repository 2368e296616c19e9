//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges the SSE routes under `/api` and the pages at `/`; unknown paths get
/// the not-found page. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<BS, PS, CS>(state: AppState<BS, PS, CS>) -> Router
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::pages::routes())
        .fallback(crate::error::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
