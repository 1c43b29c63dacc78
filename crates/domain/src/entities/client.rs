//! Client entity - read-only view of a sales contact

use serde::{Deserialize, Serialize};

use crate::{
    identity::{HasIdentity, IdentityFields},
    value_objects::RoleCategory,
};

/// A sales contact owned by the client catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Dual identifier fields
    #[serde(flatten)]
    pub identity: IdentityFields,
    /// Display name
    pub name: String,
    /// Company the contact works for
    #[serde(default)]
    pub company: String,
    /// Role category used to pick feature benefits
    pub role_category: RoleCategory,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Networking site profile URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Client {
    /// Create a client with the required fields only
    pub fn new(
        identity: IdentityFields,
        name: impl Into<String>,
        company: impl Into<String>,
        role_category: RoleCategory,
    ) -> Self {
        Self {
            identity,
            name: name.into(),
            company: company.into(),
            role_category,
            position: None,
            email: None,
            phone: None,
            linkedin_url: None,
            notes: None,
        }
    }

    /// Name and company for pickers, e.g. "Alice (Acme)"
    pub fn display_label(&self) -> String {
        if self.company.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.company)
        }
    }
}

impl HasIdentity for Client {
    fn identity(&self) -> &IdentityFields {
        &self.identity
    }
}
