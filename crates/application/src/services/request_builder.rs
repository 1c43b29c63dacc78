//! Generation request builder
//!
//! Turns the operator's form buffer into a validated [`GenerationRequest`].

use domain::{DomainError, EntityId, GenerationRequest, MessageType, Tone};

/// Form state collected across the selection and options steps
///
/// Values survive backward navigation, so a stale previous-message
/// selection may linger here after the follow-up flag is switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowForm {
    pub client_id: Option<EntityId>,
    pub product_id: Option<EntityId>,
    pub message_type: Option<MessageType>,
    pub tone: Option<Tone>,
    pub custom_instructions: String,
    pub is_follow_up: bool,
    pub previous_message_id: Option<EntityId>,
}

impl WorkflowForm {
    /// Select the client
    pub fn set_client(&mut self, id: EntityId) -> &mut Self {
        self.client_id = Some(id);
        self
    }

    /// Select the product
    pub fn set_product(&mut self, id: EntityId) -> &mut Self {
        self.product_id = Some(id);
        self
    }

    /// Select the message type
    pub fn set_message_type(&mut self, message_type: MessageType) -> &mut Self {
        self.message_type = Some(message_type);
        self
    }

    /// Select the tone
    pub fn set_tone(&mut self, tone: Tone) -> &mut Self {
        self.tone = Some(tone);
        self
    }

    /// Replace the free-text instructions
    pub fn set_instructions(&mut self, instructions: impl Into<String>) -> &mut Self {
        self.custom_instructions = instructions.into();
        self
    }

    /// Toggle the follow-up flag without touching the previous-message selection
    pub fn set_follow_up(&mut self, is_follow_up: bool) -> &mut Self {
        self.is_follow_up = is_follow_up;
        self
    }

    /// Select (or clear) the message being followed up
    pub fn set_previous_message(&mut self, id: Option<EntityId>) -> &mut Self {
        self.previous_message_id = id;
        self
    }
}

/// Builds generation requests from form state
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationRequestBuilder;

impl GenerationRequestBuilder {
    /// Build a request from the form
    ///
    /// The previous-message identifier is dropped whenever the follow-up flag
    /// is off, regardless of what the form still holds.
    ///
    /// # Errors
    /// Returns a missing-selection error naming the first absent field, or a
    /// validation error if the instructions are too long.
    pub fn build(form: &WorkflowForm) -> Result<GenerationRequest, DomainError> {
        let client_id = form
            .client_id
            .clone()
            .ok_or_else(|| DomainError::missing_selection("client"))?;
        let product_id = form
            .product_id
            .clone()
            .ok_or_else(|| DomainError::missing_selection("product"))?;
        let message_type = form
            .message_type
            .ok_or_else(|| DomainError::missing_selection("message type"))?;
        let tone = form
            .tone
            .ok_or_else(|| DomainError::missing_selection("tone"))?;

        let previous_message_id = if form.is_follow_up {
            Some(
                form.previous_message_id
                    .clone()
                    .ok_or_else(|| DomainError::missing_selection("previous message"))?,
            )
        } else {
            None
        };

        let instructions = form.custom_instructions.trim();
        let request = GenerationRequest {
            client_id,
            product_id,
            message_type,
            tone,
            custom_instructions: (!instructions.is_empty()).then(|| instructions.to_string()),
            is_follow_up: form.is_follow_up,
            previous_message_id,
        };
        request.check()?;
        Ok(request)
    }
}
