//! Message history port - previous messages available as follow-up targets

use async_trait::async_trait;
use domain::{EntityId, MessageSummary};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for listing previous messages
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageHistoryPort: Send + Sync {
    /// List messages previously generated for a client
    async fn list_for_client(
        &self,
        client_id: &EntityId,
    ) -> Result<Vec<MessageSummary>, ApplicationError>;
}
