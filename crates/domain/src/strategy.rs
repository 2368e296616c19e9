//! Load strategies — how a page keeps its remote data fresh.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a page obtains its data.
///
/// Deserialized from an inline table such as
/// `{ mode = "static", revalidate_secs = 30 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LoadStrategy {
    /// Generated ahead of time and cached; optionally refreshed in the
    /// background once the cached copy is older than `revalidate_secs`.
    Static {
        #[serde(default)]
        revalidate_secs: Option<u64>,
    },
    /// Fetched fresh for every request.
    OnRequest,
    /// Fetched by a background timer every `interval_secs`; requests read
    /// the latest value.
    Polling { interval_secs: u64 },
}

impl LoadStrategy {
    /// Static generation without revalidation.
    pub const STATIC: Self = Self::Static {
        revalidate_secs: None,
    };

    /// Static generation refreshed after `secs` seconds.
    #[must_use]
    pub const fn revalidating(secs: u64) -> Self {
        Self::Static {
            revalidate_secs: Some(secs),
        }
    }

    /// Polling every `secs` seconds.
    #[must_use]
    pub const fn polling(secs: u64) -> Self {
        Self::Polling {
            interval_secs: secs,
        }
    }

    /// Age after which a cached static value is refreshed.
    #[must_use]
    pub fn revalidate_after(&self) -> Option<Duration> {
        match self {
            Self::Static { revalidate_secs } => revalidate_secs.map(Duration::from_secs),
            Self::OnRequest | Self::Polling { .. } => None,
        }
    }

    /// Interval between two polls.
    #[must_use]
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            Self::Polling { interval_secs } => Some(Duration::from_secs(*interval_secs)),
            Self::Static { .. } | Self::OnRequest => None,
        }
    }

    /// Seconds a rendered page should wait before reloading itself, if the
    /// data behind it can change while the page is displayed.
    #[must_use]
    pub fn refresh_hint(&self) -> Option<u64> {
        match self {
            Self::Static { revalidate_secs } => *revalidate_secs,
            Self::Polling { interval_secs } => Some(*interval_secs),
            Self::OnRequest => None,
        }
    }

    /// `true` for strategies whose data is generated before the first request.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static { .. })
    }
}

impl Default for LoadStrategy {
    fn default() -> Self {
        Self::STATIC
    }
}

/// What a refresh failure does to the previously loaded value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The failure replaces the previous value; the page degrades to empty.
    #[default]
    Clear,
    /// The previous successful value stays displayed.
    KeepStale,
}

/// Per-page loading settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// How the page obtains its data.
    pub load: LoadStrategy,
    /// What a failed refresh does to the displayed data.
    pub on_error: FailurePolicy,
}

impl PageSettings {
    #[must_use]
    pub const fn new(load: LoadStrategy, on_error: FailurePolicy) -> Self {
        Self { load, on_error }
    }
}
