//! Application-level errors

use domain::{DomainError, WorkflowId};
use thiserror::Error;

use crate::services::workflow::WorkflowStep;

/// Shown when a service call fails without a usable detail message
pub const GENERIC_SERVICE_FAILURE: &str =
    "The service could not complete the request. Please try again.";

/// Coarse classification used when rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Locally detected missing or invalid selection
    Validation,
    /// A referenced entity no longer resolves or does not belong together
    Integrity,
    /// Generation or persistence call failed
    Service,
    /// Action not allowed in the current workflow step
    Workflow,
    /// Configuration or programming error
    Internal,
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error, with the service-provided detail if any
    #[error("External service error: {cause}")]
    Service {
        /// Human-readable detail from the error response body
        detail: Option<String>,
        /// Underlying cause, for logs
        cause: String,
    },

    /// Action not permitted in the current step
    #[error("Cannot {action} while {step}")]
    InvalidTransition {
        step: WorkflowStep,
        action: &'static str,
    },

    /// Another asynchronous operation is still outstanding
    #[error("Another operation is in progress: {0}")]
    OperationInFlight(WorkflowStep),

    /// The workflow instance was abandoned or replaced
    #[error("Workflow {0} is no longer active")]
    StaleWorkflow(WorkflowId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a service error
    pub fn service(detail: Option<String>, cause: impl Into<String>) -> Self {
        Self::Service {
            detail,
            cause: cause.into(),
        }
    }

    /// Classify the error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) if err.is_integrity() => ErrorKind::Integrity,
            Self::Domain(_) => ErrorKind::Validation,
            Self::Service { .. } => ErrorKind::Service,
            Self::InvalidTransition { .. } | Self::OperationInFlight(_) | Self::StaleWorkflow(_) => {
                ErrorKind::Workflow
            },
            Self::Configuration(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Text shown to the operator
    ///
    /// Service errors surface the service-provided detail verbatim and fall
    /// back to [`GENERIC_SERVICE_FAILURE`] when there is none.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::Service { .. } => GENERIC_SERVICE_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}
