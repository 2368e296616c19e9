//! Remote adapter error types.

use minisite_domain::error::FetchError;

/// Errors specific to the remote adapter.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed before a complete response was read.
    #[error("request failed")]
    Request(#[source] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The remote answered with `null` or an empty body.
    #[error("empty payload")]
    Empty,

    /// The body was not the expected JSON shape.
    #[error("failed to decode payload")]
    Decode(#[source] serde_json::Error),
}

impl From<RemoteError> for FetchError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Client(err) | RemoteError::Request(err) => FetchError::transport(err),
            RemoteError::Status(status) => FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            },
            RemoteError::Empty => FetchError::NotFound,
            RemoteError::Decode(err) => FetchError::malformed(err),
        }
    }
}
