//! Sales API adapter - Implements the catalog, generation, history and
//! message store ports using integration_sales_api

use std::sync::Arc;

use application::{
    ApplicationError,
    ports::{EntityCatalogPort, GenerationPort, MessageEdit, MessageHistoryPort, MessageStorePort},
};
use async_trait::async_trait;
use domain::{Client, DomainError, EntityId, GenerationRequest, Message, MessageSummary, Product};
use integration_sales_api::{
    MessageUpdate, Page, SalesApi, SalesApiClient, SalesApiConfig, SalesApiError,
};
use tracing::{debug, instrument, warn};

const UNAUTHORIZED_DETAIL: &str = "The service rejected the configured API token.";

/// Adapter for the sales assistant service
pub struct SalesApiAdapter {
    api: Arc<dyn SalesApi>,
    page_limit: u32,
}

impl std::fmt::Debug for SalesApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesApiAdapter")
            .field("api", &"SalesApi")
            .field("page_limit", &self.page_limit)
            .finish()
    }
}

impl SalesApiAdapter {
    /// Create an adapter with a reqwest client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: SalesApiConfig) -> Result<Self, ApplicationError> {
        let page_limit = config.page_limit;
        let client = SalesApiClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_api(Arc::new(client), page_limit))
    }

    /// Create an adapter over any API implementation
    pub fn with_api(api: Arc<dyn SalesApi>, page_limit: u32) -> Self {
        Self { api, page_limit }
    }

    /// Whether the service answers its health check
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        match self.api.health().await {
            Ok(health) => health.is_ok(),
            Err(e) => {
                warn!(error = %e, "Sales API health check failed");
                false
            },
        }
    }

    /// Convert integration error to application error
    fn map_error(err: SalesApiError) -> ApplicationError {
        let detail = match &err {
            SalesApiError::Api { detail, .. } => detail.clone(),
            SalesApiError::Unauthorized => Some(UNAUTHORIZED_DETAIL.to_string()),
            SalesApiError::ConnectionFailed(_)
            | SalesApiError::Timeout
            | SalesApiError::ParseError(_) => None,
        };
        ApplicationError::service(detail, err.to_string())
    }

    /// Request pages until one comes back short
    async fn collect_pages<T, F, Fut>(&self, fetch: F) -> Result<Vec<T>, ApplicationError>
    where
        F: Fn(Page) -> Fut,
        Fut: Future<Output = Result<Vec<T>, SalesApiError>>,
    {
        let mut rows = Vec::new();
        let mut page = Page::first(self.page_limit);
        loop {
            let batch = fetch(page).await.map_err(Self::map_error)?;
            let len = batch.len();
            rows.extend(batch);
            if page.is_last(len) {
                return Ok(rows);
            }
            page = page.next();
        }
    }
}

#[async_trait]
impl EntityCatalogPort for SalesApiAdapter {
    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>, ApplicationError> {
        let clients = self
            .collect_pages(|page| self.api.list_clients(page))
            .await?;
        debug!(count = clients.len(), "Fetched clients");
        Ok(clients)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApplicationError> {
        let products = self
            .collect_pages(|page| self.api.list_products(page))
            .await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }
}

#[async_trait]
impl GenerationPort for SalesApiAdapter {
    #[instrument(skip(self, request))]
    async fn generate(&self, request: &GenerationRequest) -> Result<Message, ApplicationError> {
        self.api.generate(request).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl MessageHistoryPort for SalesApiAdapter {
    #[instrument(skip(self), fields(client_id = %client_id))]
    async fn list_for_client(
        &self,
        client_id: &EntityId,
    ) -> Result<Vec<MessageSummary>, ApplicationError> {
        let messages = self
            .api
            .list_messages(client_id.as_str(), self.page_limit)
            .await
            .map_err(Self::map_error)?;
        debug!(count = messages.len(), "Fetched message history");
        Ok(messages.iter().map(MessageSummary::from).collect())
    }
}

#[async_trait]
impl MessageStorePort for SalesApiAdapter {
    #[instrument(skip(self, edit), fields(message_id = %id))]
    async fn update(&self, id: &EntityId, edit: &MessageEdit) -> Result<Message, ApplicationError> {
        let update = MessageUpdate {
            content: edit.content.clone(),
            subject: edit.subject.clone(),
        };
        self.api
            .update_message(id.as_str(), &update)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(message_id = %id))]
    async fn get(&self, id: &EntityId) -> Result<Message, ApplicationError> {
        self.api
            .get_message(id.as_str())
            .await
            .map_err(|err| match err {
                SalesApiError::Api { status: 404, .. } => {
                    DomainError::not_found("Message", id.as_str()).into()
                },
                other => Self::map_error(other),
            })
    }
}
