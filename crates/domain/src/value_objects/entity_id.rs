//! Identifier of a client, product or message in the backing store

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An opaque, non-empty store identifier
///
/// The backing store hands out hex object ids, but nothing here depends on
/// that format; identifiers are compared as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an identifier, rejecting blank input
    ///
    /// # Errors
    /// Returns an error if the trimmed input is empty
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue(
                "identifier must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for EntityId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let id = EntityId::new("  65f0c1  ").unwrap();
        assert_eq!(id.as_str(), "65f0c1");
    }

    #[test]
    fn blank_identifier_is_rejected() {
        assert!(EntityId::new("").is_err());
        assert!(EntityId::new("   ").is_err());
    }

    #[test]
    fn parse_via_from_str() {
        let id: EntityId = "m1".parse().unwrap();
        assert_eq!(id.to_string(), "m1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntityId::new("c1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1\"");
        let parsed: EntityId = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
