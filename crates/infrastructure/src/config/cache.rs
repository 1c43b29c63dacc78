//! Catalog cache configuration.

use std::time::Duration;

use application::ApplicationError;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Read-through cache in front of the client and product catalogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry lifetime in seconds (default: 5 minutes)
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Maximum number of cached catalog snapshots
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_ttl() -> u64 {
    5 * 60
}

const fn default_max_entries() -> u64 {
    16
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Entry lifetime
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub(super) fn validate(&self) -> Result<(), ApplicationError> {
        if self.enabled && (self.ttl_secs == 0 || self.max_entries == 0) {
            return Err(ApplicationError::Configuration(
                "cache.ttl_secs and cache.max_entries must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
