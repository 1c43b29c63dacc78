//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod catalog_port;
mod generation_port;
mod message_history_port;
mod message_store_port;

#[cfg(test)]
pub use catalog_port::MockEntityCatalogPort;
pub use catalog_port::EntityCatalogPort;
#[cfg(test)]
pub use generation_port::MockGenerationPort;
pub use generation_port::GenerationPort;
#[cfg(test)]
pub use message_history_port::MockMessageHistoryPort;
pub use message_history_port::MessageHistoryPort;
#[cfg(test)]
pub use message_store_port::MockMessageStorePort;
pub use message_store_port::{MessageEdit, MessageStorePort};
