//! PaymentEventDispatcher - Routes verified payment events to their handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::webhook::{PaymentEvent, PaymentEventType, WebhookError};
use crate::ports::PaymentEventHandler;

/// Registry of one handler per payment event kind.
#[derive(Default, Clone)]
pub struct PaymentEventDispatcher {
    handlers: HashMap<PaymentEventType, Arc<dyn PaymentEventHandler>>,
}

impl PaymentEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dispatcher from a set of handlers. Later handlers replace
    /// earlier ones for the same kind.
    pub fn with_handlers(handlers: impl IntoIterator<Item = Arc<dyn PaymentEventHandler>>) -> Self {
        let mut dispatcher = Self::new();
        for handler in handlers {
            dispatcher.register(handler);
        }
        dispatcher
    }

    /// Registers a handler for the kind it declares.
    ///
    /// Returns the handler it replaced, if any.
    pub fn register(
        &mut self,
        handler: Arc<dyn PaymentEventHandler>,
    ) -> Option<Arc<dyn PaymentEventHandler>> {
        self.handlers.insert(handler.handles(), handler)
    }

    pub fn handles(&self, kind: PaymentEventType) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Runs the handler registered for the event's kind.
    ///
    /// # Errors
    ///
    /// - `UnknownEventKind` if the kind is unrecognised or has no handler
    /// - `MalformedPayload` if `data.object` is not a payment intent
    /// - `Internal` if the handler fails
    pub async fn dispatch(&self, event: &PaymentEvent) -> Result<PaymentEventType, WebhookError> {
        let handler = event
            .kind()
            .and_then(|kind| self.handlers.get(&kind))
            .ok_or_else(|| WebhookError::UnknownEventKind(event.event_type.clone()))?;

        let intent = event.payment_intent()?;

        handler.handle(&intent).await.map_err(|e| match e {
            WebhookError::Internal(_) => e,
            other => WebhookError::Internal(other.to_string()),
        })?;

        Ok(handler.handles())
    }
}

impl std::fmt::Debug for PaymentEventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.handlers.keys().map(PaymentEventType::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("PaymentEventDispatcher")
            .field("handles", &kinds)
            .finish()
    }
}
