//! Generation port - Interface to the retrieval-augmented generation service

use async_trait::async_trait;
use domain::{GenerationRequest, Message};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for generating a message
///
/// Every call creates a new persisted message row and returns it with a
/// freshly assigned identifier. Calling again with an identical request is
/// safe but yields different content.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate a message for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<Message, ApplicationError>;
}
