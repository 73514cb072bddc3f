//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod webhook;

pub use webhook::{Acknowledgement, HandleInboundWebhookHandler, PaymentEventDispatcher};
