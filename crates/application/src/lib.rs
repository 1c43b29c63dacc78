//! Application layer - Use cases and orchestration
//!
//! Contains the message-generation workflow, the entity catalogs it reads
//! from and the port definitions its adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, ErrorKind, GENERIC_SERVICE_FAILURE};
pub use ports::*;
pub use services::*;
