//! Sales assistant API client
//!
//! HTTP client for the catalog, generation and message endpoints.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use domain::{Client, GenerationRequest, Message, Product};
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ErrorBody, HealthStatus, MessageQuery, MessageUpdate, Page};

/// Sales API client errors
#[derive(Debug, Error)]
pub enum SalesApiError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Missing or rejected bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-success response
    #[error("HTTP {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Api {
        status: u16,
        /// Detail extracted from the error body
        detail: Option<String>,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SalesApiError {
    /// Service-provided detail, if the response carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of an error response
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// Sales API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SalesApiConfig {
    /// API base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for catalog and message calls in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timeout for generation calls in seconds (default: 120)
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    /// Optional bearer token
    #[serde(default)]
    pub api_token: Option<String>,

    /// Page size for list calls (default: 100)
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl fmt::Debug for SalesApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesApiConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
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

impl Default for SalesApiConfig {
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

/// Operations offered by the sales assistant service
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// List clients
    async fn list_clients(&self, page: Page) -> Result<Vec<Client>, SalesApiError>;

    /// List products
    async fn list_products(&self, page: Page) -> Result<Vec<Product>, SalesApiError>;

    /// Generate and persist a new message
    async fn generate(&self, request: &GenerationRequest) -> Result<Message, SalesApiError>;

    /// List messages for a client, newest first
    async fn list_messages(
        &self,
        client_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, SalesApiError>;

    /// Apply content edits to a message
    async fn update_message(
        &self,
        message_id: &str,
        update: &MessageUpdate,
    ) -> Result<Message, SalesApiError>;

    /// Fetch one message
    async fn get_message(&self, message_id: &str) -> Result<Message, SalesApiError>;

    /// Service health
    async fn health(&self) -> Result<HealthStatus, SalesApiError>;
}

/// reqwest-backed implementation
#[derive(Debug)]
pub struct SalesApiClient {
    client: reqwest::Client,
    config: SalesApiConfig,
}

impl SalesApiClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: SalesApiConfig) -> Result<Self, SalesApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SalesApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &SalesApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn transport_error(error: &reqwest::Error) -> SalesApiError {
        if error.is_timeout() {
            SalesApiError::Timeout
        } else {
            SalesApiError::ConnectionFailed(error.to_string())
        }
    }

    /// Send the request and decode a JSON body, mapping error responses
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SalesApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SalesApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ErrorBody::detail_from(&body);
            warn!(status = status.as_u16(), detail = ?detail, "Sales API returned an error");
            return Err(SalesApiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        debug!(bytes = body.len(), "Sales API response received");
        serde_json::from_str(&body).map_err(|e| SalesApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl SalesApi for SalesApiClient {
    #[instrument(skip(self))]
    async fn list_clients(&self, page: Page) -> Result<Vec<Client>, SalesApiError> {
        let request = self.client.get(self.url("clients/")).query(&page);
        self.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self, page: Page) -> Result<Vec<Product>, SalesApiError> {
        let request = self.client.get(self.url("products/")).query(&page);
        self.execute(request).await
    }

    #[instrument(skip(self, request), fields(
        client_id = %request.client_id,
        product_id = %request.product_id,
        message_type = %request.message_type
    ))]
    async fn generate(&self, request: &GenerationRequest) -> Result<Message, SalesApiError> {
        let http = self
            .client
            .post(self.url("messages/generate"))
            .timeout(Duration::from_secs(self.config.generation_timeout_secs))
            .json(request);
        self.execute(http).await
    }

    #[instrument(skip(self))]
    async fn list_messages(
        &self,
        client_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, SalesApiError> {
        let request = self
            .client
            .get(self.url("messages/"))
            .query(&MessageQuery { client_id, limit });
        self.execute(request).await
    }

    #[instrument(skip(self, update))]
    async fn update_message(
        &self,
        message_id: &str,
        update: &MessageUpdate,
    ) -> Result<Message, SalesApiError> {
        let request = self
            .client
            .put(self.url(&format!("messages/{message_id}")))
            .json(update);
        self.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_message(&self, message_id: &str) -> Result<Message, SalesApiError> {
        let request = self.client.get(self.url(&format!("messages/{message_id}")));
        self.execute(request).await
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, SalesApiError> {
        let request = self.client.get(self.url("health"));
        self.execute(request).await
    }
}
