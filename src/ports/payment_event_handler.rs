//! Payment event handler port - side effects triggered by verified payment events.
//!
//! Each handler owns exactly one [`PaymentEventType`]. The webhook guard
//! dispatches a verified, deduplicated event to the handler registered for
//! its kind and only marks the event seen once the handler returns `Ok`.

use async_trait::async_trait;

use crate::domain::webhook::{PaymentEventType, PaymentIntent, WebhookError};

/// Handler for one kind of payment-intent event.
///
/// Implementations may fulfil orders, send email or update inventory. A
/// returned error makes the sender retry the delivery, so handlers should
/// tolerate being invoked again for the same intent after a failure.
///
/// # Example
///
/// ```ignore
/// struct ShipOrder { /* ... */ }
///
/// #[async_trait]
/// impl PaymentEventHandler for ShipOrder {
///     fn handles(&self) -> PaymentEventType {
///         PaymentEventType::Succeeded
///     }
///
///     async fn handle(&self, intent: &PaymentIntent) -> Result<(), WebhookError> {
///         // Mark the order paid...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait PaymentEventHandler: Send + Sync {
    /// The event kind this handler reacts to.
    fn handles(&self) -> PaymentEventType;

    /// Performs the side effect for one payment intent.
    async fn handle(&self, intent: &PaymentIntent) -> Result<(), WebhookError>;
}
