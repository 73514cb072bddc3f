//! HTTP adapter for inbound payment webhooks.
//!
//! - `POST /api/webhook` - Verify, deduplicate and dispatch a payment event

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::WebhookAckResponse;
pub use handlers::{
    receive_webhook, WebhookApiError, WebhookAppState, EVENT_ID_HEADER, EVENT_TYPE_HEADER,
    SIGNATURE_HEADER,
};
pub use routes::webhook_routes;
