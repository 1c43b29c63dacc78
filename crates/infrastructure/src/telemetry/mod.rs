//! Logging initialisation
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human-readable or a JSON formatter. Output goes to stderr so command
//! output on stdout stays clean.

use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TelemetryAppConfig;

/// Telemetry setup errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Filter from `RUST_LOG` if set, otherwise from the configured directives
pub fn env_filter(config: &TelemetryAppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// Install the global subscriber
///
/// # Example
///
/// ```ignore
/// use infrastructure::{config::TelemetryAppConfig, telemetry::init_tracing};
///
/// init_tracing(&TelemetryAppConfig::default())?;
/// ```
pub fn init_tracing(config: &TelemetryAppConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(json = config.json, filter = %config.log_filter, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        let config = TelemetryAppConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        // another test may have installed the subscriber first
        assert!(first.is_ok() || second.is_err());
        assert!(second.is_err());
    }

    #[test]
    fn filter_uses_configured_directives() {
        let config = TelemetryAppConfig {
            log_filter: "application=debug,warn".into(),
            json: false,
        };
        let filter = env_filter(&config).to_string();
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(filter.contains("application=debug"));
        }
    }
}
