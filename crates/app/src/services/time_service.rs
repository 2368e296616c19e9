//! Time service — the server timestamp shown on the home page.

use std::sync::Arc;

use minisite_domain::clock::CurrentTime;
use minisite_domain::strategy::PageSettings;

use crate::loader::{BoxFetch, Load, Loader};
use crate::poller::Latest;
use crate::ports::ClockSource;

/// Application service for the home page clock.
pub struct TimeService<S> {
    source: Arc<S>,
    clock: Loader<(), CurrentTime>,
}

impl<S> TimeService<S>
where
    S: ClockSource + Send + Sync + 'static,
{
    pub fn new(source: S, settings: PageSettings) -> Self {
        Self {
            source: Arc::new(source),
            clock: Loader::from_settings(settings),
        }
    }

    /// The last known time, or `None` while nothing usable has been fetched.
    pub async fn current_time(&self) -> Option<CurrentTime> {
        let fetch = clock_fetcher(Arc::clone(&self.source));
        match self.clock.load((), fetch).await {
            Load::Done(Ok(time)) if !time.is_empty() => Some(time),
            Load::Done(_) | Load::Pending => None,
        }
    }

    /// Follow every polled value. `None` unless the clock is polled.
    pub async fn subscribe(&self) -> Option<Latest<CurrentTime>> {
        self.clock.strategy().poll_interval()?;
        // the poller is started lazily by the first load
        let fetch = clock_fetcher(Arc::clone(&self.source));
        self.clock.load((), fetch).await;
        self.clock.subscribe(&())
    }

    /// Prepare the clock before serving: fetch it once when static, start
    /// the poller when polled.
    pub async fn prerender(&self) {
        let fetch = clock_fetcher(Arc::clone(&self.source));
        if self.clock.strategy().is_static() {
            if let Err(err) = self.clock.prime((), fetch).await {
                tracing::error!(%err, "error generating home page");
            }
        } else if self.clock.strategy().poll_interval().is_some() {
            self.clock.load((), fetch).await;
        }
    }

    /// Seconds after which the home page should reload itself.
    #[must_use]
    pub fn refresh_hint(&self) -> Option<u64> {
        self.clock.strategy().refresh_hint()
    }

    /// Stop polling the clock.
    pub fn shutdown(&self) {
        self.clock.shutdown();
    }
}

fn clock_fetcher<S>(source: Arc<S>) -> impl Fn() -> BoxFetch<CurrentTime> + Send + Sync + 'static
where
    S: ClockSource + Send + Sync + 'static,
{
    move || -> BoxFetch<CurrentTime> {
        let source = Arc::clone(&source);
        Box::pin(async move {
            source
                .current_time()
                .await
                .inspect_err(|err| tracing::warn!(%err, "error fetching current time"))
        })
    }
}
