//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required selection has not been made
    #[error("Missing selection: {field}")]
    MissingSelection { field: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A value could not be parsed or is out of range
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Cross-entity reference does not hold
    #[error("Integrity check failed: {0}")]
    IntegrityViolation(String),
}

impl DomainError {
    /// Create a missing selection error
    pub fn missing_selection(field: impl Into<String>) -> Self {
        Self::MissingSelection {
            field: field.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Whether the error was raised by a failed cross-reference check
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::IntegrityViolation(_))
    }
}
