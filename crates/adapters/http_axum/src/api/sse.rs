//! Server-Sent Events (SSE) stream of the polled clock.

use std::convert::Infallible;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};

use crate::state::AppState;

/// `GET /api/current-time/stream` — one `time` event per polled value.
///
/// Starts with the latest known value, then follows the poller until the
/// client disconnects or the poller stops. Failed polls send nothing. Answers
/// `404` when the clock is not polled.
pub async fn current_time<BS, PS, CS>(
    State(state): State<AppState<BS, PS, CS>>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, StatusCode>
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    let Some(latest) = state.time_service.subscribe().await else {
        return Err(StatusCode::NOT_FOUND);
    };

    let stream = WatchStream::new(latest).filter_map(|outcome| match outcome {
        Some(Ok(time)) if !time.is_empty() => {
            Some(Ok(Event::default().event("time").data(time.to_string())))
        }
        Some(_) | None => None,
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
