//! Detail view states.
//!
//! A detail page is in exactly one of these states. When several could
//! apply, the earlier variant wins: a pending fetch hides any error, and an
//! error hides a missing record.

use crate::error::FetchError;

/// What a detail page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView<T> {
    /// The first fetch for this record is still in flight.
    Loading,
    /// The fetch failed; carries the message to display.
    Error(String),
    /// The fetch succeeded but returned no usable record.
    NotFound,
    /// The record to display.
    Ready(T),
}

impl<T> DetailView<T> {
    /// Build the view for a completed fetch.
    ///
    /// `describe` turns a failure into the message shown to the user, or
    /// returns `None` when that failure should read as "not found".
    pub fn from_outcome<F>(outcome: Result<T, FetchError>, describe: F) -> Self
    where
        F: FnOnce(&FetchError) -> Option<String>,
    {
        match outcome {
            Ok(value) => Self::Ready(value),
            Err(err) => match describe(&err) {
                Some(message) => Self::Error(message),
                None => Self::NotFound,
            },
        }
    }

    /// Transform the ready value, keeping every other state.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DetailView<U> {
        match self {
            Self::Loading => DetailView::Loading,
            Self::Error(message) => DetailView::Error(message),
            Self::NotFound => DetailView::NotFound,
            Self::Ready(value) => DetailView::Ready(f(value)),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe_all(err: &FetchError) -> Option<String> {
        Some(format!("failed: {err}"))
    }

    #[test]
    fn should_be_ready_when_fetch_succeeds() {
        let view = DetailView::from_outcome(Ok(3), describe_all);
        assert_eq!(view, DetailView::Ready(3));
    }

    #[test]
    fn should_carry_message_when_failure_is_described() {
        let view: DetailView<u8> = DetailView::from_outcome(Err(FetchError::NotFound), describe_all);
        assert_eq!(view, DetailView::Error("failed: resource not found".to_string()));
    }

    #[test]
    fn should_be_not_found_when_failure_is_not_described() {
        let view: DetailView<u8> = DetailView::from_outcome(
            Err(FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            }),
            |_| None,
        );
        assert_eq!(view, DetailView::NotFound);
    }

    #[test]
    fn should_keep_non_ready_states_when_mapping() {
        let view: DetailView<u8> = DetailView::Loading;
        assert!(view.map(|v| v * 2).is_loading());

        let view = DetailView::Ready(2).map(|v| v * 2);
        assert_eq!(view, DetailView::Ready(4));
    }
}
