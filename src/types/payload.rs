use serde::{Deserialize, Serialize};
use std::fmt;

/// Error body returned by the registry. Every error response carries at
/// least a `type` field identifying the error kind; the registration retry
/// logic matches on it to tell id conflicts from terminal failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Optional pagination parameters accepted by list operations. Parameters
/// are forwarded verbatim when present and omitted entirely when absent.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Opaque pagination cursor
    pub marker: Option<String>,
    /// Maximum result count
    pub limit: Option<u32>,
}

impl ListOptions {
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(marker) = &self.marker {
            query.push(("marker", marker.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}
