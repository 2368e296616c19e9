//! Poller — keeps one remote value fresh on a fixed interval.
//!
//! Polls never overlap: each tick awaits its fetch before the next tick is
//! awaited, and ticks missed while a slow fetch was running are skipped.
//! Stopping the poller aborts its task, dropping any request still in flight.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use minisite_domain::error::FetchError;
use minisite_domain::strategy::FailurePolicy;

use crate::loader::settle;

/// Latest outcome published by a poller; `None` until the first poll completes.
pub type Latest<V> = watch::Receiver<Option<Result<V, FetchError>>>;

/// Shortest accepted polling interval.
const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Background task re-fetching a value every interval.
pub struct Poller<V> {
    latest: Latest<V>,
    handle: JoinHandle<()>,
}

impl<V> Poller<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Spawn the polling task. The first poll starts immediately.
    pub fn start<F, Fut>(fetch: F, interval: Duration, policy: FailurePolicy) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let (sender, latest) = watch::channel(None);
        let interval = interval.max(MIN_INTERVAL);
        let handle = tokio::spawn(run(fetch, interval, policy, sender));

        tracing::debug!(?interval, "poller started");

        Self { latest, handle }
    }

    /// The most recent outcome, if any poll has completed.
    #[must_use]
    pub fn latest(&self) -> Option<Result<V, FetchError>> {
        self.latest.borrow().clone()
    }

    /// Receive every published change from now on.
    #[must_use]
    pub fn subscribe(&self) -> Latest<V> {
        self.latest.clone()
    }

    /// Stop polling. Subscribers see their channel close.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl<V> Drop for Poller<V> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run<V, F, Fut>(
    fetch: F,
    interval: Duration,
    policy: FailurePolicy,
    sender: watch::Sender<Option<Result<V, FetchError>>>,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<V, FetchError>>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let outcome = fetch().await;
        if let Err(err) = &outcome {
            tracing::warn!(%err, "poll failed");
        }

        sender.send_if_modified(|latest| {
            let keeps_previous = outcome.is_err()
                && policy == FailurePolicy::KeepStale
                && matches!(latest, Some(Ok(_)));
            *latest = Some(settle(policy, latest.take(), outcome));
            !keeps_previous
        });
    }
}
