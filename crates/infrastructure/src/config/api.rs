//! Sales assistant service configuration.

use application::ApplicationError;
use integration_sales_api::SalesApiConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Sales assistant service endpoint and client settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiAppConfig {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for catalog and message calls in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timeout for generation calls in seconds (default: 120)
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    /// Bearer token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_token: Option<SecretString>,

    /// Page size for list calls (default: 100)
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl std::fmt::Debug for ApiAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAppConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field(
                "api_token",
                &if self.api_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("page_limit", &self.page_limit)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_generation_timeout() -> u64 {
    120
}

const fn default_page_limit() -> u32 {
    100
}

impl Default for ApiAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            generation_timeout_secs: default_generation_timeout(),
            api_token: None,
            page_limit: default_page_limit(),
        }
    }
}

impl ApiAppConfig {
    /// Get the token as a string reference (for request headers)
    #[must_use]
    pub fn api_token_str(&self) -> Option<&str> {
        self.api_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Client settings for the integration crate
    pub fn to_client_config(&self) -> SalesApiConfig {
        SalesApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            generation_timeout_secs: self.generation_timeout_secs,
            api_token: self.api_token_str().map(str::to_string),
            page_limit: self.page_limit,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ApplicationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApplicationError::Configuration(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 || self.generation_timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "api timeouts must be greater than zero".to_string(),
            ));
        }
        if self.page_limit == 0 {
            return Err(ApplicationError::Configuration(
                "api.page_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_exposes_token() {
        let config = ApiAppConfig {
            api_token: Some("abc".to_string().into()),
            ..ApiAppConfig::default()
        };
        let client = config.to_client_config();
        assert_eq!(client.api_token.as_deref(), Some("abc"));
        assert_eq!(client.base_url, config.base_url);
    }

    #[test]
    fn rejects_non_http_url() {
        let config = ApiAppConfig {
            base_url: "localhost:8000".into(),
            ..ApiAppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_zero_limits() {
        let config = ApiAppConfig {
            page_limit: 0,
            ..ApiAppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiAppConfig {
            generation_timeout_secs: 0,
            ..ApiAppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn token_is_not_serialized() {
        let config = ApiAppConfig {
            api_token: Some("abc".to_string().into()),
            ..ApiAppConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("abc"));
    }
}
