//! Shared HTTP client for every remote source.

use serde::de::DeserializeOwned;

use crate::config::RemoteConfig;
use crate::error::RemoteError;

/// reqwest client bound to the configured API and asset origins.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    api_base_url: String,
    asset_base_url: String,
}

impl RemoteClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Client`] if the TLS backend cannot be initialized.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("minisite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            asset_base_url: config.asset_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the asset host, without trailing slash.
    #[must_use]
    pub fn asset_base_url(&self) -> &str {
        &self.asset_base_url
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base_url)
    }

    pub(crate) fn asset_url(&self, path: &str) -> String {
        format!("{}/{path}", self.asset_base_url)
    }

    /// GET `url` and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        tracing::debug!(%url, "fetching remote resource");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(RemoteError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let body = response.bytes().await.map_err(RemoteError::Request)?;
        decode(&body)
    }
}

/// Decode a JSON body, reading `null` or an empty body as [`RemoteError::Empty`].
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RemoteError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RemoteError::Empty);
    }
    let value: Option<T> = serde_json::from_slice(body).map_err(RemoteError::Decode)?;
    value.ok_or(RemoteError::Empty)
}
