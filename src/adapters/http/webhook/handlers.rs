//! HTTP handler for inbound sBTC Pay webhooks.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, HeaderName};
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::application::HandleInboundWebhookHandler;
use crate::domain::webhook::{InboundEvent, WebhookError};

use super::dto::WebhookAckResponse;

/// Signature header, `t=<unix seconds>,v1=<hex hmac>`.
pub static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-sbtc-signature");
/// Event kind header, e.g. `payment_intent.succeeded`.
pub static EVENT_TYPE_HEADER: HeaderName = HeaderName::from_static("x-sbtc-event-type");
/// Unique event id header used for deduplication.
pub static EVENT_ID_HEADER: HeaderName = HeaderName::from_static("x-sbtc-event-id");

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebhookAppState {
    pub guard: Arc<HandleInboundWebhookHandler>,
}

impl WebhookAppState {
    pub fn new(guard: Arc<HandleInboundWebhookHandler>) -> Self {
        Self { guard }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhook - Receive a signed payment event
pub async fn receive_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAckResponse>, WebhookApiError> {
    // A header that is not valid UTF-8 is treated as absent.
    let header = |name: &HeaderName| headers.get(name).and_then(|v| v.to_str().ok());

    let event = InboundEvent::new(
        header(&SIGNATURE_HEADER),
        header(&EVENT_TYPE_HEADER),
        header(&EVENT_ID_HEADER),
        body.to_vec(),
    )?;

    let ack = state.guard.handle(event).await?;

    Ok(Json(WebhookAckResponse::from(ack)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_success() {
            return (status, Json(WebhookAckResponse { received: true, duplicate: None }))
                .into_response();
        }

        // Internal details stay in the logs.
        let message = match &self.0 {
            WebhookError::Internal(_) => "Webhook processing failed".to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse::new(self.0.error_code(), message);
        (status, Json(body)).into_response()
    }
}
