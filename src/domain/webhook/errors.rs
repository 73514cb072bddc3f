//! Webhook error types for sBTC Pay webhook ingestion.
//!
//! Defines every way an inbound webhook can be refused, with HTTP status code
//! mapping and retryability semantics.

use axum::http::StatusCode;
use thiserror::Error;

/// Why a signature header failed verification.
///
/// The detail is logged but never returned to the sender; every variant
/// surfaces as [`WebhookError::InvalidSignature`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// No `t=` element in the header.
    #[error("missing timestamp element")]
    MissingTimestamp,

    /// No `v1=` element in the header.
    #[error("missing v1 signature element")]
    MissingSignature,

    /// The `t=` value is not an integer.
    #[error("timestamp is not an integer")]
    MalformedTimestamp,

    /// The `v1=` value is not valid hex.
    #[error("v1 signature is not valid hex")]
    MalformedSignature,

    /// Signing time is too far from the local clock.
    #[error("timestamp is {drift_secs}s away from now (tolerance {tolerance_secs}s)")]
    OutsideTolerance { drift_secs: u64, tolerance_secs: u64 },

    /// The MAC does not match the expected value.
    #[error("signature mismatch")]
    Mismatch,
}

/// Errors that occur during webhook ingestion.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// One of the signature, event-type or event-id headers is absent or empty.
    #[error("Missing required headers")]
    MissingHeaders,

    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature(#[from] SignatureError),

    /// The verified body could not be parsed into a payment event.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// No handler exists for the event kind. Acknowledged, not an error for the sender.
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    /// Unexpected failure while processing a verified event.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebhookError {
    /// Returns true if the sender should retry delivering this webhook.
    ///
    /// Only unexpected processing failures are worth retrying; a bad
    /// signature or payload will fail the same way next time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Internal(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// - 2xx: acknowledged, no retry
    /// - 4xx: sender error, no retry
    /// - 5xx: server error, sender retries
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingHeaders | WebhookError::MalformedPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            WebhookError::UnknownEventKind(_) => StatusCode::OK,
            WebhookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            WebhookError::MissingHeaders => "MISSING_HEADERS",
            WebhookError::InvalidSignature(_) => "INVALID_SIGNATURE",
            WebhookError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            WebhookError::UnknownEventKind(_) => "UNKNOWN_EVENT_KIND",
            WebhookError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
