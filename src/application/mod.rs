//! Application layer - Handlers that coordinate domain types and ports.

pub mod handlers;

pub use handlers::{Acknowledgement, HandleInboundWebhookHandler, PaymentEventDispatcher};
