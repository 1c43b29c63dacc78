//! Adapters implementing application ports

mod cached_catalog_adapter;
mod sales_api_adapter;

pub use cached_catalog_adapter::CachedCatalogAdapter;
pub use sales_api_adapter::SalesApiAdapter;
