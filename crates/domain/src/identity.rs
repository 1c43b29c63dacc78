//! Identifier normalization
//!
//! Records coming back from the backing store expose their identifier under
//! `_id` (primary store field), under `id` (serialization alias), or under
//! both. Every lookup and cross-reference goes through [`IdentityNormalizer`]
//! so that the two spellings are never treated as different entities.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::value_objects::EntityId;

/// Both identifier fields as they appear on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    /// Primary store identifier (`_id`)
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub primary: Option<String>,

    /// Alias identifier (`id`)
    #[serde(
        rename = "id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub alias: Option<String>,
}

impl IdentityFields {
    /// Identity carrying only the primary field
    pub fn primary(id: impl Into<String>) -> Self {
        Self {
            primary: Some(id.into()),
            alias: None,
        }
    }

    /// Identity carrying only the alias field
    pub fn alias(id: impl Into<String>) -> Self {
        Self {
            primary: None,
            alias: Some(id.into()),
        }
    }

    /// Identity carrying the same value in both fields
    pub fn both(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            primary: Some(id.clone()),
            alias: Some(id),
        }
    }

    /// Present, non-blank fields in priority order
    fn present(&self) -> impl Iterator<Item = &str> {
        [self.primary.as_deref(), self.alias.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Anything that carries dual identifier fields
pub trait HasIdentity {
    /// Borrow the raw identifier fields
    fn identity(&self) -> &IdentityFields;
}

impl HasIdentity for IdentityFields {
    fn identity(&self) -> &IdentityFields {
        self
    }
}

/// Single point of identifier resolution and comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl IdentityNormalizer {
    /// Canonical identifier: the first present field, `_id` before `id`
    pub fn resolve<E: HasIdentity + ?Sized>(entity: &E) -> Option<EntityId> {
        entity
            .identity()
            .present()
            .next()
            .and_then(|id| EntityId::new(id).ok())
    }

    /// True if either identifier field equals `id` when compared as strings
    pub fn matches<E: HasIdentity + ?Sized>(entity: &E, id: &str) -> bool {
        let id = id.trim();
        !id.is_empty() && entity.identity().present().any(|candidate| candidate == id)
    }

    /// Find the entity in `entities` addressed by `id`
    pub fn find<'a, E: HasIdentity>(entities: &'a [E], id: &str) -> Option<&'a E> {
        entities.iter().find(|entity| Self::matches(*entity, id))
    }
}

/// Accept identifiers encoded as strings, numbers or `{"$oid": ...}`
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Object(map)) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    })
}
