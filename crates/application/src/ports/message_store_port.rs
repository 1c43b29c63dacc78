//! Message store port
//!
//! Commits operator edits of a draft back to durable storage. Messages are
//! created by the generation call; this port only edits existing rows.

use async_trait::async_trait;
use domain::{EntityId, Message};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Content edits applied to an existing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEdit {
    /// Edited body
    pub content: String,
    /// Edited subject, email only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Port for message persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageStorePort: Send + Sync {
    /// Apply edits to the message with the given identifier
    async fn update(&self, id: &EntityId, edit: &MessageEdit) -> Result<Message, ApplicationError>;

    /// Fetch a message by identifier
    async fn get(&self, id: &EntityId) -> Result<Message, ApplicationError>;
}
