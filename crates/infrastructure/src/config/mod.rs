//! Application configuration
//!
//! Split into focused sub-modules:
//! - `api`: sales assistant service endpoint, timeouts and token
//! - `cache`: catalog cache settings
//!
//! Values are read from an optional `config.toml`, then overridden by
//! `OUTREACH_*` environment variables using `__` between nested keys
//! (e.g. `OUTREACH_API__BASE_URL`).

mod api;
mod cache;

use std::path::Path;

use application::ApplicationError;
use serde::{Deserialize, Serialize};

pub use api::ApiAppConfig;
pub use cache::CacheConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment variable prefix
pub const ENV_PREFIX: &str = "OUTREACH";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// `EnvFilter` directives (default: `info`); `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sales assistant service
    #[serde(default)]
    pub api: ApiAppConfig,

    /// Catalog cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` in the working directory (if
    /// present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (which must exist) or the
    /// default `config.toml`, then the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Reject values the adapters cannot work with
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.api.validate()?;
        self.cache.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.generation_timeout_secs, 120);
        assert_eq!(config.api.page_limit, 100);
        assert!(config.api.api_token.is_none());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.max_entries, 16);
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(!config.telemetry.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://sales.example.com/api"
api_token = "t0ken"
generation_timeout_secs = 60

[cache]
enabled = false

[telemetry]
json = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://sales.example.com/api");
        assert_eq!(config.api.generation_timeout_secs, 60);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.api.api_token.as_ref().map(ExposeSecret::expose_secret),
            Some("t0ken")
        );
        assert!(!config.cache.enabled);
        assert!(config.telemetry.json);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load_from(Some(&path)).is_err());
    }

    #[test]
    fn debug_output_hides_token() {
        let mut config = AppConfig::default();
        config.api.api_token = Some("hunter2".to_string().into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
