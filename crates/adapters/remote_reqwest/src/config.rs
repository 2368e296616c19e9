//! Remote endpoints configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default origin of the blog and clock API.
pub const DEFAULT_API_BASE_URL: &str = "https://cryptic-bastion-20850-17d5b5f8ec19.herokuapp.com";

/// Default origin of the static asset host serving the Pokémon dataset.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://dataset-ssr-ssg.s3.eu-north-1.amazonaws.com";

/// Where the remote services live and how long to wait for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the blog and clock API.
    pub api_base_url: String,
    /// Base URL of the static asset host.
    pub asset_base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.asset_base_url, DEFAULT_ASSET_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: RemoteConfig =
            toml::from_str(r#"api_base_url = "http://localhost:4000""#).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.asset_base_url, DEFAULT_ASSET_BASE_URL);
        assert_eq!(config.timeout_ms, 10_000);
    }
}
