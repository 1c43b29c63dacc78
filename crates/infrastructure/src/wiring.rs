//! Composition of adapters into the workflow dependencies

use std::sync::Arc;

use application::{
    ApplicationError, EntityCatalogs, WorkflowDependencies, WorkflowHost,
    ports::{EntityCatalogPort, GenerationPort, MessageHistoryPort, MessageStorePort},
};
use tracing::{debug, info};

use crate::{
    adapters::{CachedCatalogAdapter, SalesApiAdapter},
    config::AppConfig,
};

/// Adapters built from configuration, ready to drive workflows
#[derive(Debug, Clone)]
pub struct AppServices {
    /// Direct access to the sales API (health check, message lookup)
    pub api: Arc<SalesApiAdapter>,
    /// Catalog cache, when enabled
    pub catalog_cache: Option<Arc<CachedCatalogAdapter>>,
    /// Collaborators for workflow instances
    pub dependencies: WorkflowDependencies,
}

impl AppServices {
    /// Validate `config` and build every adapter
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        config.validate()?;
        let api = Arc::new(SalesApiAdapter::new(config.api.to_client_config())?);

        let (catalog_port, catalog_cache): (Arc<dyn EntityCatalogPort>, _) =
            if config.cache.enabled {
                let cache = Arc::new(CachedCatalogAdapter::new(
                    Arc::clone(&api) as Arc<dyn EntityCatalogPort>,
                    &config.cache,
                ));
                (Arc::clone(&cache) as Arc<dyn EntityCatalogPort>, Some(cache))
            } else {
                (Arc::clone(&api) as Arc<dyn EntityCatalogPort>, None)
            };

        info!(
            base_url = %config.api.base_url,
            cache = config.cache.enabled,
            "Sales API services ready"
        );

        Ok(Self {
            dependencies: WorkflowDependencies {
                catalogs: EntityCatalogs::new(catalog_port),
                generation: Arc::clone(&api) as Arc<dyn GenerationPort>,
                history: Arc::clone(&api) as Arc<dyn MessageHistoryPort>,
                store: Arc::clone(&api) as Arc<dyn MessageStorePort>,
            },
            api,
            catalog_cache,
        })
    }

    /// Host for workflow instances over these services
    pub fn workflow_host(&self) -> WorkflowHost {
        WorkflowHost::new(self.dependencies.clone())
    }

    /// Catalog cache `(hits, misses)`, when the cache is enabled
    pub fn catalog_cache_stats(&self) -> Option<(u64, u64)> {
        let stats = self.catalog_cache.as_ref().map(|cache| cache.stats());
        if let Some((hits, misses)) = stats {
            debug!(hits, misses, "Catalog cache usage");
        }
        stats
    }
}
