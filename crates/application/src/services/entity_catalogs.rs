//! Entity catalogs
//!
//! Query service over the client and product catalogs. Every lookup goes
//! through the identifier normalizer and re-reads the catalog port, so a
//! refreshed catalog is picked up between workflow steps.

use std::{fmt, sync::Arc};

use domain::{Client, DomainError, EntityId, IdentityNormalizer, Product};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::EntityCatalogPort};

/// Read-only view of the client and product catalogs
#[derive(Clone)]
pub struct EntityCatalogs {
    port: Arc<dyn EntityCatalogPort>,
}

impl fmt::Debug for EntityCatalogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCatalogs").finish_non_exhaustive()
    }
}

impl EntityCatalogs {
    /// Create catalogs backed by the given port
    pub fn new(port: Arc<dyn EntityCatalogPort>) -> Self {
        Self { port }
    }

    /// All clients
    pub async fn clients(&self) -> Result<Vec<Client>, ApplicationError> {
        self.port.list_clients().await
    }

    /// All products
    pub async fn products(&self) -> Result<Vec<Product>, ApplicationError> {
        self.port.list_products().await
    }

    /// Look up a client by either identifier spelling
    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn find_client(&self, id: &EntityId) -> Result<Option<Client>, ApplicationError> {
        let clients = self.port.list_clients().await?;
        debug!(count = clients.len(), "Searching client catalog");
        Ok(IdentityNormalizer::find(&clients, id.as_str()).cloned())
    }

    /// Look up a product by either identifier spelling
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn find_product(&self, id: &EntityId) -> Result<Option<Product>, ApplicationError> {
        let products = self.port.list_products().await?;
        debug!(count = products.len(), "Searching product catalog");
        Ok(IdentityNormalizer::find(&products, id.as_str()).cloned())
    }

    /// Look up a client that must exist
    pub async fn require_client(&self, id: &EntityId) -> Result<Client, ApplicationError> {
        self.find_client(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", id.as_str()).into())
    }

    /// Look up a product that must exist
    pub async fn require_product(&self, id: &EntityId) -> Result<Product, ApplicationError> {
        self.find_product(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id.as_str()).into())
    }
}
