//! Response types and helpers for HTTP endpoints.

use serde::Serialize;

/// Error body shared by every failing endpoint: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Client-facing message
    pub error: String,
}

/// Helper to create error response
pub fn error_response(message: &str) -> ErrorResponse {
    ErrorResponse {
        error: message.to_string(),
    }
}
