//! Inbound webhook events and the payment-intent payload they carry.
//!
//! Only the fields the storefront acts on are modelled. The payment intent
//! itself stays opaque: apart from its `id`, a field of an unexpected JSON
//! type reads as absent, and the untouched object is kept for handlers.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::WebhookError;

/// A webhook request as received, before any verification.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Raw signature header (`t=...,v1=...`).
    pub signature: String,
    /// Event kind announced in the headers.
    pub event_type: String,
    /// Sender-assigned unique event id.
    pub event_id: String,
    /// Exact request body bytes; the signature covers these.
    pub raw_body: Vec<u8>,
}

impl InboundEvent {
    /// Builds an inbound event from the three required headers and the body.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MissingHeaders` if any header is absent or empty.
    pub fn new(
        signature: Option<&str>,
        event_type: Option<&str>,
        event_id: Option<&str>,
        raw_body: Vec<u8>,
    ) -> Result<Self, WebhookError> {
        let required = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .ok_or(WebhookError::MissingHeaders)
        };

        Ok(Self {
            signature: required(signature)?,
            event_type: required(event_type)?,
            event_id: required(event_id)?,
            raw_body,
        })
    }
}

/// Payment-intent lifecycle events the storefront reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentEventType {
    Created,
    Succeeded,
    Failed,
    Canceled,
}

impl PaymentEventType {
    pub const ALL: [PaymentEventType; 4] = [
        PaymentEventType::Created,
        PaymentEventType::Succeeded,
        PaymentEventType::Failed,
        PaymentEventType::Canceled,
    ];

    /// Parses a dotted event name. Returns `None` for kinds we do not know.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "payment_intent.created" => Some(Self::Created),
            "payment_intent.succeeded" => Some(Self::Succeeded),
            "payment_intent.failed" => Some(Self::Failed),
            "payment_intent.canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// The dotted event name as sent by sBTC Pay.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "payment_intent.created",
            Self::Succeeded => "payment_intent.succeeded",
            Self::Failed => "payment_intent.failed",
            Self::Canceled => "payment_intent.canceled",
        }
    }
}

impl fmt::Display for PaymentEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified webhook body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEvent {
    /// Event id inside the body, when the sender includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Dotted event kind, e.g. `payment_intent.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,

    pub data: PaymentEventData,
}

/// Container for the event's subject.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEventData {
    /// The payment intent, left untyped until dispatch needs it.
    pub object: serde_json::Value,
}

impl PaymentEvent {
    /// Parses a verified body.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedPayload` if the body is not JSON or
    /// lacks `type` / `data.object`.
    pub fn parse(raw_body: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(raw_body).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }

    /// The known kind of this event, if any.
    pub fn kind(&self) -> Option<PaymentEventType> {
        PaymentEventType::from_event_name(&self.event_type)
    }

    /// Reads `data.object` as a payment intent.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedPayload` if the object is not a JSON
    /// object or has no string `id`. Other fields never fail the read.
    pub fn payment_intent(&self) -> Result<PaymentIntent, WebhookError> {
        let mut intent = PaymentIntent::deserialize(&self.data.object).map_err(|e| {
            WebhookError::MalformedPayload(format!("invalid payment intent: {}", e))
        })?;
        intent.raw = self.data.object.clone();
        Ok(intent)
    }
}

/// The processor's record of one attempted Bitcoin payment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PaymentIntent {
    pub id: String,

    /// Amount in the smallest sBTC unit.
    #[serde(default, deserialize_with = "lenient")]
    pub amount: Option<u64>,

    #[serde(default, deserialize_with = "lenient")]
    pub amount_usd: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,

    /// Stacks address of the payer.
    #[serde(default, deserialize_with = "lenient")]
    pub customer_address: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub customer_email: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    /// Merchant-supplied metadata (order id, failure reason, ...).
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,

    /// On-chain transaction id once the payment is broadcast.
    #[serde(default, deserialize_with = "lenient")]
    pub tx_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub receipt_url: Option<String>,

    /// The `data.object` exactly as received.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

/// Reads an optional field, treating a value of the wrong JSON type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl PaymentIntent {
    /// Looks up a string metadata value.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }

    pub fn order_id(&self) -> Option<&str> {
        self.metadata_str("order_id")
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.metadata_str("failure_reason")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // InboundEvent
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn inbound_event_requires_all_headers() {
        let ok = InboundEvent::new(
            Some("t=1,v1=aa"),
            Some("payment_intent.created"),
            Some("evt_1"),
            b"{}".to_vec(),
        )
        .unwrap();
        assert_eq!(ok.event_id, "evt_1");
        assert_eq!(ok.raw_body, b"{}");

        let cases = [
            (None, Some("t"), Some("e")),
            (Some("s"), None, Some("e")),
            (Some("s"), Some("t"), None),
            (Some(""), Some("t"), Some("e")),
            (Some("s"), Some(""), Some("e")),
            (Some("s"), Some("t"), Some("")),
        ];
        for (sig, kind, id) in cases {
            let result = InboundEvent::new(sig, kind, id, Vec::new());
            assert!(
                matches!(result, Err(WebhookError::MissingHeaders)),
                "expected MissingHeaders for {:?}",
                (sig, kind, id)
            );
        }
    }

    // ══════════════════════════════════════════════════════════════
    // PaymentEventType
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn event_type_round_trips_through_name() {
        for kind in PaymentEventType::ALL {
            assert_eq!(PaymentEventType::from_event_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_event_name_is_none() {
        assert_eq!(
            PaymentEventType::from_event_name("payment_intent.refunded"),
            None
        );
        assert_eq!(PaymentEventType::from_event_name("PAYMENT_INTENT.CREATED"), None);
    }

    #[test]
    fn event_type_displays_dotted_name() {
        assert_eq!(
            PaymentEventType::Canceled.to_string(),
            "payment_intent.canceled"
        );
    }

    // ══════════════════════════════════════════════════════════════
    // PaymentEvent
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_minimal_event() {
        let body = br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_1"}}}"#;

        let event = PaymentEvent::parse(body).unwrap();

        assert_eq!(event.kind(), Some(PaymentEventType::Succeeded));
        assert!(event.id.is_none());
        let intent = event.payment_intent().unwrap();
        assert_eq!(intent.id, "pi_1");
        assert!(intent.amount.is_none());
        assert!(intent.metadata.is_none());
    }

    #[test]
    fn parse_full_event() {
        let body = serde_json::json!({
            "id": "evt_test_1",
            "type": "payment_intent.failed",
            "created": 1704067200000u64,
            "data": {
                "object": {
                    "id": "pi_test_1",
                    "object": "payment_intent",
                    "amount": 100000,
                    "amount_usd": 65.5,
                    "currency": "sbtc",
                    "status": "failed",
                    "customer_address": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM",
                    "customer_email": "customer@example.com",
                    "metadata": {
                        "order_id": "ORD-12345",
                        "failure_reason": "Insufficient funds",
                        "attempt": 2
                    },
                    "tx_id": "0x123abc",
                    "receipt_url": "https://explorer.stacks.co/txid/0x123abc",
                    "livemode": false
                }
            }
        });

        let event = PaymentEvent::parse(&serde_json::to_vec(&body).unwrap()).unwrap();
        let intent = event.payment_intent().unwrap();

        assert_eq!(event.id.as_deref(), Some("evt_test_1"));
        assert_eq!(intent.amount, Some(100000));
        assert_eq!(intent.order_id(), Some("ORD-12345"));
        assert_eq!(intent.failure_reason(), Some("Insufficient funds"));
        assert_eq!(intent.metadata_str("attempt"), None);
        assert_eq!(intent.tx_id.as_deref(), Some("0x123abc"));
    }

    #[test]
    fn parse_rejects_non_json() {
        let result = PaymentEvent::parse(b"not json");

        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn parse_rejects_missing_type() {
        let result = PaymentEvent::parse(br#"{"data":{"object":{}}}"#);

        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn parse_rejects_missing_data_object() {
        let result = PaymentEvent::parse(br#"{"type":"payment_intent.created","data":{}}"#);

        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn payment_intent_requires_id() {
        let event =
            PaymentEvent::parse(br#"{"type":"payment_intent.created","data":{"object":{}}}"#)
                .unwrap();

        assert!(matches!(
            event.payment_intent(),
            Err(WebhookError::MalformedPayload(_))
        ));
    }

    #[test]
    fn mistyped_optional_fields_read_as_absent() {
        let body = serde_json::json!({
            "type": "payment_intent.succeeded",
            "data": {
                "object": {
                    "id": "pi_2",
                    "amount": 65.5,
                    "amount_usd": "65.50",
                    "customer_email": null,
                    "metadata": "ORD-1",
                    "tx_id": 12345,
                    "receipt_url": "https://explorer.stacks.co/txid/0x1"
                }
            }
        });
        let event = PaymentEvent::parse(&serde_json::to_vec(&body).unwrap()).unwrap();

        let intent = event.payment_intent().unwrap();

        assert_eq!(intent.id, "pi_2");
        assert_eq!(intent.amount, None);
        assert_eq!(intent.amount_usd, None);
        assert_eq!(intent.customer_email, None);
        assert_eq!(intent.order_id(), None);
        assert_eq!(intent.tx_id, None);
        assert_eq!(
            intent.receipt_url.as_deref(),
            Some("https://explorer.stacks.co/txid/0x1")
        );
        assert_eq!(intent.raw["amount"], 65.5);
        assert_eq!(intent.raw["tx_id"], 12345);
    }

    #[test]
    fn payment_intent_rejects_non_object() {
        let event =
            PaymentEvent::parse(br#"{"type":"payment_intent.created","data":{"object":"pi_1"}}"#)
                .unwrap();

        assert!(matches!(
            event.payment_intent(),
            Err(WebhookError::MalformedPayload(_))
        ));
    }

    #[test]
    fn unknown_kind_parses() {
        let event = PaymentEvent::parse(
            br#"{"type":"payment_intent.refunded","data":{"object":{"id":"pi_9"}}}"#,
        )
        .unwrap();

        assert_eq!(event.kind(), None);
        assert_eq!(event.event_type, "payment_intent.refunded");
    }
}
