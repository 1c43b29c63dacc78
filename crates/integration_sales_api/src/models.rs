//! Wire bodies that have no counterpart in the domain model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Offset pagination for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    /// First page of the given size
    pub const fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    /// Page following this one
    pub const fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    /// True if a response of `len` rows ends the listing
    pub const fn is_last(self, len: usize) -> bool {
        self.limit == 0 || len < self.limit as usize
    }
}

/// Body of `PUT /messages/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageUpdate {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageQuery<'a> {
    pub client_id: &'a str,
    pub limit: u32,
}

/// Error envelope: `{"detail": "..."}` or `{"detail": [{"msg": "..."}]}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    /// Operator-facing text extracted from a raw error body
    pub(crate) fn detail_from(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        let text = match parsed.detail? {
            Value::String(detail) => detail,
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; "),
            _ => return None,
        };
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
