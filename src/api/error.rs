//! Error types for the remote posts API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-level validation messages returned with HTTP 422.
///
/// Body shape: `{ "error": { "<field>": "<message>", ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default)]
    pub error: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.error.get(name).map(String::as_str)
    }

    pub fn with_field(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.error.insert(name.into(), message.into());
        self
    }

    /// Parse a 422 body, falling back to an empty set of messages.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Errors that can occur when talking to the posts API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Base URL or post id does not form a valid request URL
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The server rejected the submitted post (HTTP 422).
    #[error("Validation failed: {} field(s) rejected", .0.error.len())]
    Validation(ValidationErrors),

    /// Failed to reach the server
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request to '{url}' timed out after {duration}s")]
    Timeout { url: String, duration: u64 },

    /// Server answered with a non-success status
    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    /// Short machine-readable category for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Build(_) => "build_error",
            ApiError::InvalidUrl { .. } => "invalid_url",
            ApiError::Validation(_) => "validation_error",
            ApiError::Connection { .. } => "connection_error",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Status { .. } => "status_error",
            ApiError::Decode { .. } => "decode_error",
        }
    }
}
