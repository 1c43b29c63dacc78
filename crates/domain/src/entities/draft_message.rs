//! Draft message held in working memory between generation and commit

use serde::{Deserialize, Serialize};

use crate::{
    entities::{GenerationRequest, Message},
    errors::DomainError,
    identity::IdentityNormalizer,
    value_objects::{EntityId, MessageType},
};

/// Output of a successful generation call, pending operator edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMessage {
    /// Identifier assigned by the generation service
    pub id: EntityId,
    pub message_type: MessageType,
    /// Present only for email drafts
    pub subject: Option<String>,
    pub content: String,
    /// Request that produced this draft, reused verbatim on regeneration
    pub request: GenerationRequest,
}

impl DraftMessage {
    /// Build a draft from the message the generation service created
    ///
    /// # Errors
    /// Returns an integrity error if the generated message carries no identifier
    pub fn from_generated(message: &Message, request: GenerationRequest) -> Result<Self, DomainError> {
        let id = IdentityNormalizer::resolve(message).ok_or_else(|| {
            DomainError::IntegrityViolation("generated message has no identifier".to_string())
        })?;

        let message_type = request.message_type;
        let subject = message_type
            .has_subject()
            .then(|| message.subject.clone().unwrap_or_default());

        Ok(Self {
            id,
            message_type,
            subject,
            content: message.content.clone(),
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{identity::IdentityFields, value_objects::Tone};

    fn request(message_type: MessageType) -> GenerationRequest {
        GenerationRequest {
            client_id: EntityId::new("c1").unwrap(),
            product_id: EntityId::new("p1").unwrap(),
            message_type,
            tone: Tone::Formal,
            custom_instructions: None,
            is_follow_up: false,
            previous_message_id: None,
        }
    }

    fn generated(identity: IdentityFields, subject: Option<&str>) -> Message {
        serde_json::from_value(serde_json::json!({
            "client_id": "c1",
            "product_id": "p1",
            "message_type": "email",
            "subject": subject,
            "content": "Hello"
        }))
        .map(|mut m: Message| {
            m.identity = identity;
            m
        })
        .unwrap()
    }

    #[test]
    fn email_draft_keeps_subject() {
        let message = generated(IdentityFields::primary("m1"), Some("Intro"));
        let draft = DraftMessage::from_generated(&message, request(MessageType::Email)).unwrap();
        assert_eq!(draft.id.as_str(), "m1");
        assert_eq!(draft.subject.as_deref(), Some("Intro"));
        assert_eq!(draft.content, "Hello");
    }

    #[test]
    fn email_draft_without_subject_gets_empty_subject() {
        let message = generated(IdentityFields::alias("m1"), None);
        let draft = DraftMessage::from_generated(&message, request(MessageType::Email)).unwrap();
        assert_eq!(draft.subject.as_deref(), Some(""));
    }

    #[test]
    fn note_draft_drops_subject() {
        let message = generated(IdentityFields::alias("m2"), Some("ignored"));
        let draft =
            DraftMessage::from_generated(&message, request(MessageType::NetworkingNote)).unwrap();
        assert!(draft.subject.is_none());
        assert_eq!(draft.id.as_str(), "m2");
    }

    #[test]
    fn missing_identifier_is_integrity_error() {
        let message = generated(IdentityFields::default(), None);
        let err = DraftMessage::from_generated(&message, request(MessageType::Email)).unwrap_err();
        assert!(err.is_integrity());
    }
}
