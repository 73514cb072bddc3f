//! Webhook command handlers.

mod dispatcher;
mod handle_inbound_webhook;

pub use dispatcher::PaymentEventDispatcher;
pub use handle_inbound_webhook::{Acknowledgement, HandleInboundWebhookHandler};
