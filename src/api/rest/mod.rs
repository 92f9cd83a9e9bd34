//! REST endpoints
//!
//! - `POST /messages` - Ingest one telemetry message
//! - `GET /rockets` - List rockets with optional `sort`
//! - `GET /rockets/:id` - Get a single rocket
//! - `GET /stats` - Pipeline counters

pub mod messages;
pub mod rockets;
pub mod stats;

use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn buffer_full(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BUFFER_FULL".to_string(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "UNAVAILABLE".to_string(),
        }
    }
}
