//! Shared JSON error body for API responses.

use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_serializes_code_and_message_only() {
        let json = serde_json::to_value(ErrorResponse::new("INVALID_SIGNATURE", "Invalid signature"))
            .unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error_code": "INVALID_SIGNATURE", "message": "Invalid signature" })
        );
    }
}
