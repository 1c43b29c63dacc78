//! Sales assistant API integration
//!
//! Client for the REST service that owns the client and product catalogs,
//! runs retrieval-augmented message generation and persists messages.

pub mod client;
mod models;

pub use client::{SalesApi, SalesApiClient, SalesApiConfig, SalesApiError};
pub use models::{HealthStatus, MessageUpdate, Page};
