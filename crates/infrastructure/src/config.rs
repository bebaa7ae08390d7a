//! Client configuration.
//!
//! Layered with the `config` crate, later layers overriding earlier ones:
//! 1. Built-in defaults
//! 2. A TOML file: `--config <path>` or `<config_dir>/submanager/config.toml`
//! 3. Environment variables prefixed with `SUBMANAGER_`
//!    (e.g. `SUBMANAGER_API_BASE_URL`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://servsys-backend.onrender.com";

const ENV_PREFIX: &str = "SUBMANAGER";
const DEFAULT_TIMEOUT_SECS: u32 = 30;
const DEFAULT_UPCOMING_DAYS: u32 = 7;
const DEFAULT_NOTIFICATION_LIMIT: u32 = 50;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// `api_base_url` is not an absolute http(s) URL.
    #[error("invalid api_base_url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// What is wrong with it.
        reason: String,
    },

    /// `request_timeout_secs` is zero.
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Settings for the `submanager` client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Backend base URL.
    pub api_base_url: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Days ahead shown as upcoming renewals.
    pub upcoming_window_days: u32,
    /// Notifications fetched per listing.
    pub notification_limit: u32,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Token file override.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: u64::from(DEFAULT_TIMEOUT_SECS),
            upcoming_window_days: DEFAULT_UPCOMING_DAYS,
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            token_path: None,
        }
    }
}

impl AppConfig {
    /// Returns the default config file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("submanager").join("config.toml"))
    }

    /// Loads all layers. An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    /// Returns an error if a source is malformed or the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        match path {
            Some(path) => Self::from_sources(Some((path, true)), Some(env)),
            None => {
                let default = Self::default_path();
                Self::from_sources(default.as_deref().map(|p| (p, false)), Some(env))
            }
        }
    }

    fn from_sources(
        file: Option<(&Path, bool)>,
        env: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_secs", i64::from(DEFAULT_TIMEOUT_SECS))?
            .set_default("upcoming_window_days", i64::from(DEFAULT_UPCOMING_DAYS))?
            .set_default("notification_limit", i64::from(DEFAULT_NOTIFICATION_LIMIT))?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?;

        if let Some((path, required)) = file {
            builder = builder.add_source(File::from(path).required(required));
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the loader cannot type-check.
    ///
    /// # Errors
    /// Returns the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Parses `api_base_url`.
    ///
    /// # Errors
    /// Returns an error unless the URL is absolute http or https.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::from_sources(None, None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "api_base_url = \"http://localhost:8000\"\nupcoming_window_days = 14\n",
        );

        let config = AppConfig::from_sources(Some((&path, true)), None).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.upcoming_window_days, 14);
        assert_eq!(config.notification_limit, 50);
    }

    #[test]
    fn test_missing_optional_file_is_fine() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::from_sources(Some((&path, false)), None).is_ok());
        assert!(AppConfig::from_sources(Some((&path, true)), None).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "request_timeout_secs = 5\n");
        let vars = HashMap::from([(
            "SUBMANAGER_REQUEST_TIMEOUT_SECS".to_string(),
            "9".to_string(),
        )]);
        let env = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(vars));

        let config = AppConfig::from_sources(Some((&path, true)), Some(env)).unwrap();

        assert_eq!(config.request_timeout_secs, 9);
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "api_base_url = \"ftp://example.com\"\n");
        assert!(matches!(
            AppConfig::from_sources(Some((&path, true)), None),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }
}
