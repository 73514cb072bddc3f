//! sBTC Pay webhook signature verification.
//!
//! Signatures are HMAC-SHA256 over `"{timestamp}.{raw body}"`, carried in a
//! header of the form `t=<unix-seconds>,v1=<hex-mac>`. The timestamp must sit
//! inside a fixed window around the local clock so captured requests cannot be
//! replayed later with a fresh event id.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Default signature tolerance window (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Parsed components of the signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Timestamp exactly as it appeared in the header; this is what was signed.
    pub timestamp_raw: String,
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Decoded v1 signature (HMAC-SHA256).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>`. Element order does not matter,
    /// the first occurrence of each key wins, and anything else is ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp_raw: Option<&str> = None;
        let mut v1_hex: Option<&str> = None;

        for element in header.split(',') {
            if let Some(value) = element.strip_prefix("t=") {
                timestamp_raw.get_or_insert(value);
            } else if let Some(value) = element.strip_prefix("v1=") {
                v1_hex.get_or_insert(value);
            }
        }

        let timestamp_raw = timestamp_raw
            .filter(|t| !t.is_empty())
            .ok_or(SignatureError::MissingTimestamp)?;
        let v1_hex = v1_hex
            .filter(|v| !v.is_empty())
            .ok_or(SignatureError::MissingSignature)?;

        let timestamp = timestamp_raw
            .parse::<i64>()
            .map_err(|_| SignatureError::MalformedTimestamp)?;
        let v1_signature = hex::decode(v1_hex).map_err(|_| SignatureError::MalformedSignature)?;

        Ok(SignatureHeader {
            timestamp_raw: timestamp_raw.to_string(),
            timestamp,
            v1_signature,
        })
    }
}

/// Verifier for sBTC Pay webhook signatures.
pub struct WebhookVerifier {
    /// Shared signing secret configured on the processor side.
    secret: SecretString,
    /// Maximum allowed distance between signing time and now.
    tolerance_secs: u64,
}

impl WebhookVerifier {
    /// Creates a verifier with the default 300 second tolerance.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_tolerance(secret, DEFAULT_TOLERANCE_SECS)
    }

    /// Creates a verifier with a custom tolerance window.
    pub fn with_tolerance(secret: impl Into<String>, tolerance_secs: u64) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            tolerance_secs,
        }
    }

    pub fn tolerance_secs(&self) -> u64 {
        self.tolerance_secs
    }

    /// Verifies `payload` against the signature header using the current clock.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Verifies `payload` against the signature header as of `now`.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the header into timestamp and v1 signature
    /// 2. Reject timestamps more than the tolerance away from `now`, in either direction
    /// 3. Recompute HMAC-SHA256 over `"{timestamp}.{payload}"`
    /// 4. Compare against the provided signature in constant time
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), SignatureError> {
        let header = SignatureHeader::parse(signature_header)?;

        let drift_secs = now.abs_diff(header.timestamp);
        if drift_secs > self.tolerance_secs {
            return Err(SignatureError::OutsideTolerance {
                drift_secs,
                tolerance_secs: self.tolerance_secs,
            });
        }

        let expected = compute_signature(
            self.secret.expose_secret().as_bytes(),
            &header.timestamp_raw,
            payload,
        );

        if !constant_time_compare(&expected, &header.v1_signature) {
            return Err(SignatureError::Mismatch);
        }

        Ok(())
    }
}

/// Computes HMAC-SHA256 over `"{timestamp}.{payload}"`.
///
/// The payload bytes are fed in untouched; re-encoding them would change the MAC.
pub fn compute_signature(secret: &[u8], timestamp: &str, payload: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Builds a complete `t=...,v1=...` header for `payload` signed at `timestamp`.
///
/// This is what the payment processor sends; the storefront uses it for the
/// test-webhook tool and in tests.
pub fn sign_payload(secret: &[u8], timestamp: i64, payload: &[u8]) -> String {
    let timestamp = timestamp.to_string();
    let signature = compute_signature(secret, &timestamp, payload);
    format!("t={},v1={}", timestamp, hex::encode(signature))
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
