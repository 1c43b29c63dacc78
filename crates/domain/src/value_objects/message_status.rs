//! Lifecycle status of a persisted message

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status the persistence service tracks for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Created by the generation call, not yet sent
    #[default]
    Draft,
    /// Sent to the client
    Sent,
    /// Client has replied
    Responded,
}

impl MessageStatus {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Responded => "Responded",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
