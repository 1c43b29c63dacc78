//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer over the sales
//! assistant REST service, plus configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{ApiAppConfig, AppConfig, CacheConfig, TelemetryAppConfig};
pub use telemetry::{TelemetryError, init_tracing};
pub use wiring::AppServices;
