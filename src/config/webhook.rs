//! Webhook ingestion configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::webhook::{DEFAULT_SEEN_EVENT_CAPACITY, DEFAULT_TOLERANCE_SECS};

use super::error::ValidationError;

/// Configuration for verifying and deduplicating inbound webhooks
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared HMAC secret issued by sBTC Pay
    pub secret: SecretString,

    /// Maximum allowed distance between the signing timestamp and now, in seconds
    #[serde(default = "default_signature_tolerance")]
    pub signature_tolerance_secs: u64,

    /// Number of processed event ids remembered for deduplication
    #[serde(default = "default_seen_event_capacity")]
    pub seen_event_capacity: usize,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SBTC_STOREFRONT__WEBHOOK__SECRET"));
        }
        if self.signature_tolerance_secs == 0 {
            return Err(ValidationError::InvalidSignatureTolerance);
        }
        if self.seen_event_capacity == 0 {
            return Err(ValidationError::InvalidSeenEventCapacity);
        }
        Ok(())
    }
}

fn default_signature_tolerance() -> u64 {
    DEFAULT_TOLERANCE_SECS
}

fn default_seen_event_capacity() -> usize {
    DEFAULT_SEEN_EVENT_CAPACITY
}
