//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//!
//! Successful reads and writes return the record itself (or an array of
//! records). Only errors, deletions and the health check use the small
//! envelopes below.

use serde::{Deserialize, Serialize};

/// Error body.
///
/// ```json
/// { "error": "not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Status body returned by `GET /health` and every DELETE.
///
/// ```json
/// { "status": "deleted" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"ok"` or `"deleted"`.
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}
