//! Property tests for webhook signature verification.

use proptest::prelude::*;

use sbtc_storefront::domain::webhook::{sign_payload, SignatureError, WebhookVerifier};

const NOW: i64 = 1_735_689_600;

proptest! {
    #[test]
    fn signed_payload_verifies(
        secret in "[a-zA-Z0-9_]{1,48}",
        payload in proptest::collection::vec(any::<u8>(), 0..512),
        skew in -300i64..=300,
    ) {
        let header = sign_payload(secret.as_bytes(), NOW + skew, &payload);

        prop_assert!(WebhookVerifier::new(secret).verify_at(&payload, &header, NOW).is_ok());
    }

    #[test]
    fn flipping_any_payload_bit_breaks_verification(
        payload in proptest::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let verifier = WebhookVerifier::new("whsec_prop");
        let header = sign_payload(b"whsec_prop", NOW, &payload);

        let mut tampered = payload.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= 1 << bit;

        prop_assert_eq!(
            verifier.verify_at(&tampered, &header, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn different_secret_never_verifies(
        secret in "[a-z]{8,32}",
        other in "[A-Z]{8,32}",
        payload in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let header = sign_payload(other.as_bytes(), NOW, &payload);

        prop_assert_eq!(
            WebhookVerifier::new(secret).verify_at(&payload, &header, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn stale_or_future_timestamps_are_rejected(
        drift in 301i64..100_000,
        future in any::<bool>(),
        payload in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        let signed_at = if future { NOW + drift } else { NOW - drift };
        let header = sign_payload(b"whsec_prop", signed_at, &payload);

        let result = WebhookVerifier::new("whsec_prop").verify_at(&payload, &header, NOW);

        let rejected_for_drift = matches!(
            result,
            Err(SignatureError::OutsideTolerance { drift_secs, tolerance_secs: 300 })
                if drift_secs == drift as u64
        );
        prop_assert!(rejected_for_drift);
    }
}
