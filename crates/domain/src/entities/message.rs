//! Persisted message entity and the summary shown in follow-up pickers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    identity::{HasIdentity, IdentityFields},
    value_objects::{EntityId, MessageStatus, MessageType, Tone},
};

/// A message as stored by the persistence service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Dual identifier fields
    #[serde(flatten)]
    pub identity: IdentityFields,
    /// Client the message was written for
    pub client_id: EntityId,
    /// Product the message pitches
    pub product_id: EntityId,
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Subject line, email only
    #[serde(default)]
    pub subject: Option<String>,
    /// Body text with lightweight markup
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_follow_up: bool,
    #[serde(default)]
    pub previous_message_id: Option<EntityId>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Recorded client reply, opaque to this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_response: Option<serde_json::Value>,
}

impl HasIdentity for Message {
    fn identity(&self) -> &IdentityFields {
        &self.identity
    }
}

/// Compact view of a previous message, used to pick a follow-up target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    #[serde(flatten)]
    pub identity: IdentityFields,
    pub client_id: EntityId,
    pub message_type: MessageType,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl MessageSummary {
    /// One-line label for pickers
    pub fn label(&self) -> String {
        let when = self
            .created_at
            .map_or_else(|| "unknown date".to_string(), |t| t.format("%Y-%m-%d").to_string());
        match self.subject.as_deref().filter(|s| !s.is_empty()) {
            Some(subject) => format!("{} - {subject} ({when})", self.message_type),
            None => format!("{} ({when})", self.message_type),
        }
    }
}

impl From<&Message> for MessageSummary {
    fn from(message: &Message) -> Self {
        Self {
            identity: message.identity.clone(),
            client_id: message.client_id.clone(),
            message_type: message.message_type,
            subject: message.subject.clone(),
            status: message.status,
            created_at: message.created_at,
        }
    }
}

impl HasIdentity for MessageSummary {
    fn identity(&self) -> &IdentityFields {
        &self.identity
    }
}

/// Timestamps arrive either as RFC 3339 or as naive UTC (`2024-01-15T12:00:00.123456`)
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub(super) fn parse(s: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| format!("invalid timestamp: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityNormalizer;

    fn stored_message_json() -> serde_json::Value {
        serde_json::json!({
            "_id": "m1",
            "id": "m1",
            "client_id": "c1",
            "product_id": "p1",
            "message_type": "email",
            "tone": "professional",
            "subject": "Intro to Widget",
            "content": "Hi Alice,\n\n**Widget** saves time.",
            "is_follow_up": false,
            "previous_message_id": null,
            "created_by": "u1",
            "created_at": "2024-01-15T12:00:00.123456",
            "updated_at": "2024-01-15T12:00:00.123456",
            "status": "draft",
            "client_response": null
        })
    }

    #[test]
    fn deserializes_stored_message() {
        let message: Message = serde_json::from_value(stored_message_json()).unwrap();
        assert_eq!(IdentityNormalizer::resolve(&message).unwrap().as_str(), "m1");
        assert_eq!(message.message_type, MessageType::Email);
        assert_eq!(message.tone, Some(Tone::Professional));
        assert_eq!(message.status, MessageStatus::Draft);
        assert!(message.created_at.is_some());
        assert!(message.client_response.is_none());
    }

    #[test]
    fn summary_keeps_identity_and_client() {
        let message: Message = serde_json::from_value(stored_message_json()).unwrap();
        let summary = MessageSummary::from(&message);
        assert!(IdentityNormalizer::matches(&summary, "m1"));
        assert_eq!(summary.client_id.as_str(), "c1");
        assert_eq!(summary.subject.as_deref(), Some("Intro to Widget"));
    }

    #[test]
    fn summary_label_mentions_subject_and_date() {
        let message: Message = serde_json::from_value(stored_message_json()).unwrap();
        let label = MessageSummary::from(&message).label();
        assert_eq!(label, "Email - Intro to Widget (2024-01-15)");
    }

    #[test]
    fn timestamp_accepts_rfc3339_and_naive() {
        assert!(timestamp::parse("2024-01-15T12:00:00Z").is_ok());
        assert!(timestamp::parse("2024-01-15T12:00:00+02:00").is_ok());
        assert!(timestamp::parse("2024-01-15T12:00:00").is_ok());
        assert!(timestamp::parse("2024-01-15 12:00:00.5").is_ok());
        assert!(timestamp::parse("yesterday").is_err());
    }
}
