//! JSON and streaming endpoints under `/api`.

pub mod sse;

use axum::Router;
use axum::routing::get;

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<BS, PS, CS>() -> Router<AppState<BS, PS, CS>>
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    Router::new().route(
        "/current-time/stream",
        get(sse::current_time::<BS, PS, CS>),
    )
}
