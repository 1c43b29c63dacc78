//! Domain layer for the outreach assistant
//!
//! Contains clients, products, messages and drafts, the identifier
//! normalization shared by every lookup, and domain errors.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod identity;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use identity::{HasIdentity, IdentityFields, IdentityNormalizer};
pub use value_objects::*;
