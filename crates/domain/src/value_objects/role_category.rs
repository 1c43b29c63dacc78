//! Role category of a client contact

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Fixed set of role categories used to tailor feature benefits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    Executive,
    Technical,
    Finance,
    Marketing,
    Sales,
    Operations,
}

impl RoleCategory {
    /// Every category, in display order
    pub const ALL: [Self; 6] = [
        Self::Executive,
        Self::Technical,
        Self::Finance,
        Self::Marketing,
        Self::Sales,
        Self::Operations,
    ];

    /// Wire value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::Technical => "technical",
            Self::Finance => "finance",
            Self::Marketing => "marketing",
            Self::Sales => "sales",
            Self::Operations => "operations",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| DomainError::InvalidValue(format!("unknown role category '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_categories_parse() {
        for category in RoleCategory::ALL {
            assert_eq!(category.as_str().parse::<RoleCategory>().unwrap(), category);
        }
    }

    #[test]
    fn works_as_json_map_key() {
        let json = r#"{"finance": ["lower cost"]}"#;
        let map: std::collections::BTreeMap<RoleCategory, Vec<String>> =
            serde_json::from_str(json).unwrap();
        assert_eq!(map[&RoleCategory::Finance], vec!["lower cost".to_string()]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("legal".parse::<RoleCategory>().is_err());
    }
}
