//! Workflow instance identifier used to reject stale completions

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for one message-generation workflow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    /// Create a new random workflow ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a workflow ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_workflow_id_is_unique() {
        assert_ne!(WorkflowId::new(), WorkflowId::new());
    }

    #[test]
    fn from_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(WorkflowId::from_uuid(uuid).as_uuid(), uuid);
    }

    #[test]
    fn display_shows_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(WorkflowId::from_uuid(uuid).to_string(), uuid.to_string());
    }
}
