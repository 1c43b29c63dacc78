//! Generation request sent to the retrieval-augmented generation service

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{EntityId, MessageType, Tone},
};

/// Upper bound on operator-supplied instructions
pub const MAX_CUSTOM_INSTRUCTIONS_LEN: usize = 2000;

/// Same limit typed for the `validator` length attribute
const MAX_CUSTOM_INSTRUCTIONS_LEN_U64: u64 = MAX_CUSTOM_INSTRUCTIONS_LEN as u64;

/// Everything the generation service needs to write one message
///
/// Built fresh for every generation attempt and never persisted directly.
/// The serialized form is the request body of the generate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    pub client_id: EntityId,
    pub product_id: EntityId,
    pub message_type: MessageType,
    pub tone: Tone,
    #[validate(length(max = MAX_CUSTOM_INSTRUCTIONS_LEN_U64))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    #[serde(default)]
    pub is_follow_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_message_id: Option<EntityId>,
}

impl GenerationRequest {
    /// Check field limits and follow-up linkage
    ///
    /// # Errors
    /// Returns an error if instructions are too long, if a follow-up has no
    /// previous message, or if a previous message is set without the flag.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::ValidationError(format!("custom instructions: {e}")))?;

        match (self.is_follow_up, &self.previous_message_id) {
            (true, None) => Err(DomainError::missing_selection("previous message")),
            (false, Some(_)) => Err(DomainError::ValidationError(
                "previous message set on a request that is not a follow-up".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
