//! Entity catalog port
//!
//! Read-only access to the client and product lists. Implementations may
//! cache; callers must not assume two calls return the same snapshot.

use async_trait::async_trait;
use domain::{Client, Product};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching the client and product catalogs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntityCatalogPort: Send + Sync {
    /// List all clients visible to the operator
    async fn list_clients(&self) -> Result<Vec<Client>, ApplicationError>;

    /// List all products visible to the operator
    async fn list_products(&self) -> Result<Vec<Product>, ApplicationError>;
}
