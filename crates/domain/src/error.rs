//! Fetch error taxonomy shared by every layer.
//!
//! Adapters convert their own typed errors into [`FetchError`] at the port
//! boundary. The type is `Clone` because loaders cache failed outcomes next
//! to successful ones, so underlying sources are held behind an `Arc`.

use std::error::Error as StdError;
use std::sync::Arc;

/// Boxed source error that can be shared between cache readers.
pub type SharedError = Arc<dyn StdError + Send + Sync>;

/// Why a remote resource could not be turned into a display value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (unreachable, timeout, body read).
    #[error("transport failure")]
    Transport(#[source] SharedError),

    /// The remote answered with a non-success status.
    #[error("unexpected status {status} {reason}")]
    Status { status: u16, reason: String },

    /// The remote answered successfully but carried no record.
    #[error("resource not found")]
    NotFound,

    /// The payload did not match the expected shape.
    #[error("malformed payload")]
    Malformed(#[source] SharedError),
}

impl FetchError {
    /// Wrap any transport-level error.
    pub fn transport(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wrap any decoding error.
    pub fn malformed(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Malformed(Arc::new(err))
    }

    /// `true` when the remote reported that the record does not exist,
    /// either with a `404` or with an empty payload.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound => true,
            Self::Status { status, .. } => *status == 404,
            Self::Transport(_) | Self::Malformed(_) => false,
        }
    }

    /// Short human-readable reason, used in rendered error messages.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Status { reason, .. } if !reason.is_empty() => reason.clone(),
            Self::Status { status, .. } => format!("HTTP {status}"),
            other => other.to_string(),
        }
    }
}
