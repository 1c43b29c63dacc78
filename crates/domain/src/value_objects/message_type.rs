//! Outbound message channel

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Kind of message to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// Email with a subject line
    #[serde(rename = "email")]
    Email,
    /// Short note on a professional networking site, no subject
    #[serde(rename = "linkedin", alias = "networking_note")]
    NetworkingNote,
}

impl MessageType {
    /// Whether drafts of this type carry a subject line
    #[must_use]
    pub const fn has_subject(&self) -> bool {
        matches!(self, Self::Email)
    }

    /// Wire value understood by the generation service
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::NetworkingNote => "linkedin",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::NetworkingNote => "Networking note",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MessageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "linkedin" | "note" | "networking-note" | "networking_note" => {
                Ok(Self::NetworkingNote)
            },
            other => Err(DomainError::InvalidValue(format!(
                "unknown message type '{other}', use 'email' or 'linkedin'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_email_has_subject() {
        assert!(MessageType::Email.has_subject());
        assert!(!MessageType::NetworkingNote.has_subject());
    }

    #[test]
    fn wire_values() {
        assert_eq!(
            serde_json::to_string(&MessageType::NetworkingNote).unwrap(),
            "\"linkedin\""
        );
        let parsed: MessageType = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(parsed, MessageType::Email);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(
            "networking-note".parse::<MessageType>().unwrap(),
            MessageType::NetworkingNote
        );
        assert_eq!(" EMAIL ".parse::<MessageType>().unwrap(), MessageType::Email);
        assert!("fax".parse::<MessageType>().is_err());
    }
}
