//! Webhook domain module.
//!
//! Verifies and deduplicates inbound sBTC Pay payment events.
//!
//! # Module Structure
//!
//! - `errors` - WebhookError taxonomy and signature failure reasons
//! - `event` - InboundEvent, PaymentEvent and PaymentIntent payloads
//! - `seen_events` - Bounded set of processed event ids with per-id claims
//! - `signature` - HMAC-SHA256 signature header parsing and verification

mod errors;
mod event;
mod seen_events;
mod signature;

pub use errors::{SignatureError, WebhookError};
pub use event::{InboundEvent, PaymentEvent, PaymentEventData, PaymentEventType, PaymentIntent};
pub use seen_events::{Claim, EventClaim, SeenEventSet, DEFAULT_SEEN_EVENT_CAPACITY};
pub use signature::{
    compute_signature, sign_payload, SignatureHeader, WebhookVerifier, DEFAULT_TOLERANCE_SECS,
};
