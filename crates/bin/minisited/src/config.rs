//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `minisite.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use minisite_adapter_remote_reqwest::RemoteConfig;
use minisite_domain::strategy::{FailurePolicy, LoadStrategy, PageSettings};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Remote API and asset host.
    pub remote: RemoteConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// How each page loads its data.
    pub pages: PagesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Per-page load settings.
///
/// Fields a page section leaves out keep that page's own defaults.
#[derive(Debug, Deserialize)]
#[serde(from = "PageOverrides")]
pub struct PagesConfig {
    /// Blog listing.
    pub blogs: PageSettings,
    /// Blog post detail pages.
    pub blog_detail: PageSettings,
    /// Pokémon listing and detail pages.
    pub pokemon: PageSettings,
    /// Home page clock.
    pub home: PageSettings,
}

impl Config {
    /// Load configuration from `minisite.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("minisite.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MINISITE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MINISITE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("MINISITE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("MINISITE_API_BASE_URL") {
            self.remote.api_base_url = val;
        }
        if let Ok(val) = std::env::var("MINISITE_ASSET_BASE_URL") {
            self.remote.asset_base_url = val;
        }
        if let Ok(val) = std::env::var("MINISITE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        for (name, url) in [
            ("api_base_url", &self.remote.api_base_url),
            ("asset_base_url", &self.remote.asset_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be an http(s) URL"
                )));
            }
        }
        for (name, page) in self.pages.entries() {
            if let LoadStrategy::Polling { interval_secs: 0 } = page.load {
                return Err(ConfigError::Validation(format!(
                    "pages.{name}: polling interval must be non-zero"
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `[pages.*]` sections as written in the file.
#[derive(Default, Deserialize)]
#[serde(default)]
struct PageOverrides {
    blogs: PageOverride,
    blog_detail: PageOverride,
    pokemon: PageOverride,
    home: PageOverride,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PageOverride {
    load: Option<LoadStrategy>,
    on_error: Option<FailurePolicy>,
}

impl PageOverride {
    fn over(self, defaults: PageSettings) -> PageSettings {
        PageSettings::new(
            self.load.unwrap_or(defaults.load),
            self.on_error.unwrap_or(defaults.on_error),
        )
    }
}

impl From<PageOverrides> for PagesConfig {
    fn from(overrides: PageOverrides) -> Self {
        let defaults = Self::default();
        Self {
            blogs: overrides.blogs.over(defaults.blogs),
            blog_detail: overrides.blog_detail.over(defaults.blog_detail),
            pokemon: overrides.pokemon.over(defaults.pokemon),
            home: overrides.home.over(defaults.home),
        }
    }
}

impl PagesConfig {
    /// Each page section with its name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &PageSettings)> {
        [
            ("blogs", &self.blogs),
            ("blog_detail", &self.blog_detail),
            ("pokemon", &self.pokemon),
            ("home", &self.home),
        ]
        .into_iter()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "minisited=info,minisite=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            blogs: PageSettings::new(LoadStrategy::STATIC, FailurePolicy::Clear),
            blog_detail: PageSettings::new(LoadStrategy::revalidating(30), FailurePolicy::Clear),
            pokemon: PageSettings::new(LoadStrategy::revalidating(30), FailurePolicy::Clear),
            home: PageSettings::new(LoadStrategy::polling(5), FailurePolicy::KeepStale),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
