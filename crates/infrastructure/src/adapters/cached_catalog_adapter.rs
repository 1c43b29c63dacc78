//! Cached catalog adapter - read-through moka cache in front of any
//! `EntityCatalogPort`
//!
//! Failures are never cached; the next call goes to the inner port again.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use application::{ApplicationError, ports::EntityCatalogPort};
use async_trait::async_trait;
use domain::{Client, Product};
use moka::future::Cache;
use tracing::{debug, instrument};

use crate::config::CacheConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CatalogKey {
    Clients,
    Products,
}

#[derive(Debug, Clone)]
enum CatalogSnapshot {
    Clients(Arc<Vec<Client>>),
    Products(Arc<Vec<Product>>),
}

/// Catalog port decorator with a time-bounded cache
pub struct CachedCatalogAdapter {
    inner: Arc<dyn EntityCatalogPort>,
    cache: Cache<CatalogKey, CatalogSnapshot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for CachedCatalogAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCatalogAdapter")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl CachedCatalogAdapter {
    /// Wrap `inner` with a cache configured by `config`
    pub fn new(inner: Arc<dyn EntityCatalogPort>, config: &CacheConfig) -> Self {
        Self::with_ttl(inner, config.ttl(), config.max_entries)
    }

    /// Wrap `inner` with an explicit TTL and capacity
    pub fn with_ttl(inner: Arc<dyn EntityCatalogPort>, ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop all cached snapshots
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
        debug!("Catalog cache invalidated");
    }

    /// `(hits, misses)` since creation
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    async fn lookup(&self, key: CatalogKey) -> Option<CatalogSnapshot> {
        let found = self.cache.get(&key).await;
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(?key, "Catalog cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(?key, "Catalog cache miss");
        }
        found
    }
}

#[async_trait]
impl EntityCatalogPort for CachedCatalogAdapter {
    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>, ApplicationError> {
        if let Some(CatalogSnapshot::Clients(clients)) = self.lookup(CatalogKey::Clients).await {
            return Ok(clients.as_ref().clone());
        }
        let clients = self.inner.list_clients().await?;
        self.cache
            .insert(
                CatalogKey::Clients,
                CatalogSnapshot::Clients(Arc::new(clients.clone())),
            )
            .await;
        Ok(clients)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApplicationError> {
        if let Some(CatalogSnapshot::Products(products)) = self.lookup(CatalogKey::Products).await
        {
            return Ok(products.as_ref().clone());
        }
        let products = self.inner.list_products().await?;
        self.cache
            .insert(
                CatalogKey::Products,
                CatalogSnapshot::Products(Arc::new(products.clone())),
            )
            .await;
        Ok(products)
    }
}
