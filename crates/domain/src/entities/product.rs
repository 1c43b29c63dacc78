//! Product entity - read-only view of something being sold

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    identity::{HasIdentity, IdentityFields},
    value_objects::RoleCategory,
};

/// A product feature with benefit texts per role category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: BTreeMap<RoleCategory, Vec<String>>,
}

impl Feature {
    /// Benefit texts for one role category
    pub fn benefits_for(&self, role: RoleCategory) -> &[String] {
        self.benefits
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A product owned by the product catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Dual identifier fields
    #[serde(flatten)]
    pub identity: IdentityFields,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered feature list
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Documentation references fed to retrieval
    #[serde(default)]
    pub documentation_urls: Vec<String>,
}

impl Product {
    /// Create a product without features
    pub fn new(
        identity: IdentityFields,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            name: name.into(),
            description: description.into(),
            features: Vec::new(),
            documentation_urls: Vec::new(),
        }
    }

    /// Add a feature
    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Benefit texts of every feature for one role, in feature order
    pub fn benefits_for(&self, role: RoleCategory) -> Vec<&str> {
        self.features
            .iter()
            .flat_map(|feature| feature.benefits_for(role))
            .map(String::as_str)
            .collect()
    }
}

impl HasIdentity for Product {
    fn identity(&self) -> &IdentityFields {
        &self.identity
    }
}
