//! HandleInboundWebhookHandler - Guards the storefront against forged and repeated webhooks.
//!
//! Processing order for one inbound event:
//!
//! 1. Claim the event id. An id already seen is acknowledged as a duplicate
//!    without re-verifying or re-dispatching.
//! 2. Verify the HMAC signature over the raw body.
//! 3. Parse the body into a payment event.
//! 4. Dispatch by the body's `type`. Unknown kinds are acknowledged.
//! 5. Commit the claim, marking the id seen.
//!
//! Any failure before step 5 drops the claim, so nothing is remembered and
//! the sender may retry.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::webhook::{
    Claim, InboundEvent, PaymentEvent, SeenEventSet, WebhookError, WebhookVerifier,
};

use super::PaymentEventDispatcher;

/// Successful outcome of webhook ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    /// True if the event id had already been processed.
    pub duplicate: bool,
}

impl Acknowledgement {
    pub fn processed() -> Self {
        Self { duplicate: false }
    }

    pub fn duplicate() -> Self {
        Self { duplicate: true }
    }
}

/// Handler for inbound sBTC Pay webhooks.
pub struct HandleInboundWebhookHandler {
    seen_events: Arc<SeenEventSet>,
    verifier: Arc<WebhookVerifier>,
    dispatcher: Arc<PaymentEventDispatcher>,
}

impl HandleInboundWebhookHandler {
    pub fn new(
        seen_events: Arc<SeenEventSet>,
        verifier: Arc<WebhookVerifier>,
        dispatcher: Arc<PaymentEventDispatcher>,
    ) -> Self {
        Self {
            seen_events,
            verifier,
            dispatcher,
        }
    }

    pub async fn handle(&self, event: InboundEvent) -> Result<Acknowledgement, WebhookError> {
        let claim = match self.seen_events.claim(&event.event_id).await {
            Claim::Seen => {
                debug!(event_id = %event.event_id, "Duplicate webhook acknowledged");
                return Ok(Acknowledgement::duplicate());
            }
            Claim::Fresh(claim) => claim,
        };

        if let Err(reason) = self.verifier.verify(&event.raw_body, &event.signature) {
            warn!(
                event_id = %event.event_id,
                reason = %reason,
                "Invalid webhook signature"
            );
            return Err(reason.into());
        }

        let payment_event = PaymentEvent::parse(&event.raw_body).map_err(|e| {
            warn!(event_id = %event.event_id, error = %e, "Rejected webhook payload");
            e
        })?;

        if payment_event.event_type != event.event_type {
            warn!(
                event_id = %event.event_id,
                header_type = %event.event_type,
                body_type = %payment_event.event_type,
                "Webhook event type header disagrees with body; dispatching by body"
            );
        }

        match self.dispatcher.dispatch(&payment_event).await {
            Ok(kind) => {
                debug!(event_id = %event.event_id, event_type = %kind, "Webhook dispatched");
            }
            Err(WebhookError::UnknownEventKind(kind)) => {
                info!(event_id = %event.event_id, event_type = %kind, "Unhandled webhook event type");
            }
            Err(e @ WebhookError::Internal(_)) => {
                error!(event_id = %event.event_id, error = %e, "Webhook handler failed");
                return Err(e);
            }
            Err(e) => {
                warn!(event_id = %event.event_id, error = %e, "Rejected webhook payload");
                return Err(e);
            }
        }

        if let Some(evicted) = claim.commit() {
            debug!(evicted_event_id = %evicted, "Seen event set at capacity; evicted oldest id");
        }

        Ok(Acknowledgement::processed())
    }
}
