//! Logging payment event handlers.
//!
//! The demo storefront has no order store or mailer, so each lifecycle event
//! is recorded as a structured log line. Real deployments replace these with
//! handlers that fulfil orders or send receipts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::webhook::{PaymentEventType, PaymentIntent, WebhookError};
use crate::ports::PaymentEventHandler;

/// Logs newly created payment intents.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPaymentCreated;

#[async_trait]
impl PaymentEventHandler for LogPaymentCreated {
    fn handles(&self) -> PaymentEventType {
        PaymentEventType::Created
    }

    async fn handle(&self, intent: &PaymentIntent) -> Result<(), WebhookError> {
        info!(
            payment_intent_id = %intent.id,
            amount = ?intent.amount,
            customer_email = ?intent.customer_email,
            metadata = ?intent.metadata,
            "New payment intent created"
        );
        Ok(())
    }
}

/// Logs settled payments and the confirmation email that would be sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPaymentSucceeded;

#[async_trait]
impl PaymentEventHandler for LogPaymentSucceeded {
    fn handles(&self) -> PaymentEventType {
        PaymentEventType::Succeeded
    }

    async fn handle(&self, intent: &PaymentIntent) -> Result<(), WebhookError> {
        info!(
            payment_intent_id = %intent.id,
            tx_id = ?intent.tx_id,
            receipt_url = ?intent.receipt_url,
            order_id = ?intent.order_id(),
            "Payment succeeded"
        );
        if let Some(email) = &intent.customer_email {
            info!(payment_intent_id = %intent.id, customer_email = %email, "Would send confirmation email");
        }
        Ok(())
    }
}

/// Logs failed payments and the customer notification that would be sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPaymentFailed;

#[async_trait]
impl PaymentEventHandler for LogPaymentFailed {
    fn handles(&self) -> PaymentEventType {
        PaymentEventType::Failed
    }

    async fn handle(&self, intent: &PaymentIntent) -> Result<(), WebhookError> {
        info!(
            payment_intent_id = %intent.id,
            failure_reason = ?intent.failure_reason(),
            "Payment failed"
        );
        if let Some(email) = &intent.customer_email {
            info!(payment_intent_id = %intent.id, customer_email = %email, "Would notify customer of failure");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogPaymentCanceled;

#[async_trait]
impl PaymentEventHandler for LogPaymentCanceled {
    fn handles(&self) -> PaymentEventType {
        PaymentEventType::Canceled
    }

    async fn handle(&self, intent: &PaymentIntent) -> Result<(), WebhookError> {
        info!(
            payment_intent_id = %intent.id,
            order_id = ?intent.order_id(),
            "Payment canceled"
        );
        Ok(())
    }
}

/// One logging handler for every known payment event kind.
pub fn logging_handlers() -> Vec<Arc<dyn PaymentEventHandler>> {
    vec![
        Arc::new(LogPaymentCreated),
        Arc::new(LogPaymentSucceeded),
        Arc::new(LogPaymentFailed),
        Arc::new(LogPaymentCanceled),
    ]
}
