//! Resource loader — the one data-loading component behind every page.
//!
//! A [`Loader`] is parameterized by a [`LoadStrategy`]:
//!
//! | Strategy     | Behavior |
//! |--------------|----------|
//! | `static`     | cached per key; refreshed in the background once older than `revalidate_secs` (stale-while-revalidate) |
//! | `on_request` | fetched for every call, never cached |
//! | `polling`    | a [`Poller`] per key refreshes the value; calls read the latest outcome |
//!
//! With fallback enabled, the first call for an unknown static key returns
//! [`Load::Pending`] and fetches in the background, so the page can render
//! its loading placeholder instead of blocking.
//!
//! Failed outcomes are cached for primed keys only. For any other key a
//! failure is served once and then forgotten, and only a bounded number of
//! such keys are cached at all; past that, requests fetch without caching.
//! Whether a failure replaces a previous success is decided by the
//! [`FailurePolicy`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use minisite_domain::error::FetchError;
use minisite_domain::strategy::{FailurePolicy, LoadStrategy, PageSettings};

use crate::poller::{Latest, Poller};

/// Outcome of a [`Loader::load`] call.
#[derive(Debug, Clone)]
pub enum Load<V> {
    /// No outcome yet; a fetch is running in the background.
    Pending,
    /// The current outcome for the key.
    Done(Result<V, FetchError>),
}

/// Boxed fetch future, for fetchers built by services.
pub type BoxFetch<V> = Pin<Box<dyn Future<Output = Result<V, FetchError>> + Send>>;

/// Most entries a loader keeps for keys that were not primed.
const MAX_UNPRIMED: usize = 256;

enum Entry<V> {
    Pending,
    Ready {
        outcome: Result<V, FetchError>,
        fetched_at: Instant,
        refreshing: bool,
        primed: bool,
    },
}

impl<V> Entry<V> {
    fn is_primed(&self) -> bool {
        matches!(self, Self::Ready { primed: true, .. })
    }
}

enum Action<V> {
    Uncached,
    Refresh(Result<V, FetchError>),
    Fallback,
    Inline,
}

/// Where an outcome being stored comes from.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Generated ahead of the first request.
    Primed,
    /// Fetched while a request waits; the request sees the outcome itself.
    Request,
    /// Fetched in the background; the next request reads the outcome.
    Background,
}

type Entries<K, V> = Arc<Mutex<HashMap<K, Entry<V>>>>;

/// Strategy-driven loader for values of type `V`, keyed by `K`.
pub struct Loader<K, V> {
    strategy: LoadStrategy,
    policy: FailurePolicy,
    fallback: bool,
    entries: Entries<K, V>,
    pollers: Mutex<HashMap<K, Poller<V>>>,
}

impl<K, V> Loader<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a loader without fallback.
    #[must_use]
    pub fn new(strategy: LoadStrategy, policy: FailurePolicy) -> Self {
        Self {
            strategy,
            policy,
            fallback: false,
            entries: Arc::new(Mutex::new(HashMap::new())),
            pollers: Mutex::new(HashMap::new()),
        }
    }

    /// Create a loader from page settings.
    #[must_use]
    pub fn from_settings(settings: PageSettings) -> Self {
        Self::new(settings.load, settings.on_error)
    }

    /// Enable or disable the background fallback for unknown static keys.
    #[must_use]
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> LoadStrategy {
        self.strategy
    }

    /// Return the current outcome for `key`, fetching with `fetch` as the
    /// strategy requires.
    pub async fn load<F, Fut>(&self, key: K, fetch: F) -> Load<V>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        match self.strategy {
            LoadStrategy::OnRequest => Load::Done(fetch().await),
            LoadStrategy::Static { .. } => self.load_static(key, fetch).await,
            LoadStrategy::Polling { .. } => self.load_polled(key, fetch),
        }
    }

    /// Fetch and store `key` before any request asks for it.
    ///
    /// Only static loaders keep the result; other strategies simply fetch.
    pub async fn prime<F, Fut>(&self, key: K, fetch: F) -> Result<V, FetchError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let outcome = fetch().await;
        if self.strategy.is_static() {
            store(&self.entries, self.policy, key, outcome, Origin::Primed)
        } else {
            outcome
        }
    }

    /// Subscribe to the poller of `key`, if one is running.
    #[must_use]
    pub fn subscribe(&self, key: &K) -> Option<Latest<V>> {
        lock(&self.pollers).get(key).map(Poller::subscribe)
    }

    /// Stop every poller owned by this loader.
    pub fn shutdown(&self) {
        for (key, poller) in lock(&self.pollers).drain() {
            poller.stop();
            tracing::debug!(?key, "poller stopped");
        }
    }

    async fn load_static<F, Fut>(&self, key: K, fetch: F) -> Load<V>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let revalidate_after = self.strategy.revalidate_after();

        let action = {
            let mut entries = lock(&self.entries);
            if !entries.contains_key(&key) && unprimed(&entries) >= MAX_UNPRIMED {
                Action::Uncached
            } else {
                match entries.get_mut(&key) {
                    Some(Entry::Pending) => return Load::Pending,
                    Some(Entry::Ready {
                        outcome,
                        primed: false,
                        ..
                    }) if outcome.is_err() => {
                        let outcome = outcome.clone();
                        entries.remove(&key);
                        return Load::Done(outcome);
                    }
                    Some(Entry::Ready {
                        outcome,
                        fetched_at,
                        refreshing,
                        ..
                    }) => {
                        let stale = revalidate_after.is_some_and(|age| fetched_at.elapsed() >= age);
                        if !stale || *refreshing {
                            return Load::Done(outcome.clone());
                        }
                        *refreshing = true;
                        Action::Refresh(outcome.clone())
                    }
                    None if self.fallback => {
                        entries.insert(key.clone(), Entry::Pending);
                        Action::Fallback
                    }
                    None => Action::Inline,
                }
            }
        };

        match action {
            Action::Uncached => {
                tracing::debug!(?key, "cache full, fetching without caching");
                Load::Done(fetch().await)
            }
            Action::Refresh(current) => {
                tracing::debug!(?key, "revalidating stale entry");
                self.spawn_fetch(key, fetch);
                Load::Done(current)
            }
            Action::Fallback => {
                tracing::debug!(?key, "fallback fetch started");
                self.spawn_fetch(key, fetch);
                Load::Pending
            }
            Action::Inline => {
                let outcome = fetch().await;
                Load::Done(store(
                    &self.entries,
                    self.policy,
                    key,
                    outcome,
                    Origin::Request,
                ))
            }
        }
    }

    fn load_polled<F, Fut>(&self, key: K, fetch: F) -> Load<V>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let interval = self.strategy.poll_interval().unwrap_or_default();
        let mut pollers = lock(&self.pollers);
        let poller = pollers.entry(key).or_insert_with_key(|key| {
            tracing::debug!(?key, "starting poller");
            Poller::start(fetch, interval, self.policy)
        });

        match poller.latest() {
            Some(outcome) => Load::Done(outcome),
            None => Load::Pending,
        }
    }

    fn spawn_fetch<F, Fut>(&self, key: K, fetch: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let entries = Arc::clone(&self.entries);
        let policy = self.policy;
        tokio::spawn(async move {
            let outcome = fetch().await;
            if let Err(err) = store(&entries, policy, key, outcome, Origin::Background) {
                tracing::debug!(%err, "background fetch stored a failure");
            }
        });
    }
}

/// Combine a new outcome with the previous one according to `policy`.
pub(crate) fn settle<V>(
    policy: FailurePolicy,
    previous: Option<Result<V, FetchError>>,
    next: Result<V, FetchError>,
) -> Result<V, FetchError> {
    match (policy, previous, next) {
        (_, _, Ok(value)) => Ok(value),
        (FailurePolicy::KeepStale, Some(Ok(previous)), Err(err)) => {
            tracing::debug!(%err, "keeping previous value after failed refresh");
            Ok(previous)
        }
        (_, _, Err(err)) => Err(err),
    }
}

/// Record `outcome` for `key` and return what the key now holds.
///
/// A failure for a key that was never primed is kept only when it comes
/// from a background fetch, so the request waiting on it can read it once.
fn store<K, V>(
    entries: &Mutex<HashMap<K, Entry<V>>>,
    policy: FailurePolicy,
    key: K,
    outcome: Result<V, FetchError>,
    origin: Origin,
) -> Result<V, FetchError>
where
    K: Eq + Hash,
    V: Clone,
{
    let mut entries = lock(entries);
    let (previous, was_primed) = match entries.remove(&key) {
        Some(Entry::Ready {
            outcome, primed, ..
        }) => (Some(outcome), primed),
        Some(Entry::Pending) | None => (None, false),
    };
    let primed = was_primed || origin == Origin::Primed;
    let outcome = settle(policy, previous, outcome);
    if outcome.is_ok() || primed || origin == Origin::Background {
        entries.insert(
            key,
            Entry::Ready {
                outcome: outcome.clone(),
                fetched_at: Instant::now(),
                refreshing: false,
                primed,
            },
        );
    }
    outcome
}

fn unprimed<K, V>(entries: &HashMap<K, Entry<V>>) -> usize {
    entries.values().filter(|entry| !entry.is_primed()).count()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
