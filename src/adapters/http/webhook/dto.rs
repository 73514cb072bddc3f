//! Response DTOs for the webhook endpoint.

use serde::{Deserialize, Serialize};

use crate::application::Acknowledgement;

/// Body returned when a webhook is accepted.
///
/// Serializes as `{"received":true}` or `{"received":true,"duplicate":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAckResponse {
    pub received: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
}

impl From<Acknowledgement> for WebhookAckResponse {
    fn from(ack: Acknowledgement) -> Self {
        Self {
            received: true,
            duplicate: ack.duplicate.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processed_ack_has_no_duplicate_flag() {
        let json = serde_json::to_value(WebhookAckResponse::from(Acknowledgement::processed()))
            .unwrap();
        assert_eq!(json, serde_json::json!({ "received": true }));
    }

    #[test]
    fn duplicate_ack_is_flagged() {
        let json = serde_json::to_value(WebhookAckResponse::from(Acknowledgement::duplicate()))
            .unwrap();
        assert_eq!(json, serde_json::json!({ "received": true, "duplicate": true }));
    }
}
