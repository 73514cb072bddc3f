//! Sends one signed sample event of every payment kind to a running storefront.
//!
//! Reads the signing secret from `SBTC_STOREFRONT__WEBHOOK__SECRET` and the
//! target from `WEBHOOK_TARGET_URL` (default `http://localhost:8080/api/webhook`).

use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use sbtc_storefront::adapters::http::webhook::{
    EVENT_ID_HEADER, EVENT_TYPE_HEADER, SIGNATURE_HEADER,
};
use sbtc_storefront::domain::webhook::{sign_payload, PaymentEventType};

const DEFAULT_TARGET_URL: &str = "http://localhost:8080/api/webhook";

fn sample_event(kind: PaymentEventType, now_millis: i64) -> Value {
    let name = kind.as_str();
    let status = name.rsplit('.').next().unwrap_or(name);

    let mut metadata = json!({
        "order_id": "ORD-12345",
        "customer_id": "CUST-67890"
    });
    if kind == PaymentEventType::Failed {
        metadata["failure_reason"] = json!("Insufficient funds");
    }

    json!({
        "id": format!("evt_test_{}_{}", name, now_millis),
        "type": name,
        "created": now_millis,
        "data": {
            "object": {
                "id": format!("pi_test_{}_{}", name, now_millis),
                "object": "payment_intent",
                "amount": 100000,
                "amount_usd": 65.50,
                "currency": "sbtc",
                "status": status,
                "customer_address": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM",
                "customer_email": "customer@example.com",
                "description": "Purchase of Product XYZ",
                "metadata": metadata,
                "tx_id": "0x123abc456def789",
                "receipt_url": "https://explorer.stacks.co/txid/0x123abc456def789",
                "created": now_millis,
                "livemode": false
            }
        }
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let secret = match std::env::var("SBTC_STOREFRONT__WEBHOOK__SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            tracing::error!("SBTC_STOREFRONT__WEBHOOK__SECRET is not set");
            return ExitCode::FAILURE;
        }
    };
    let target =
        std::env::var("WEBHOOK_TARGET_URL").unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string());

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("SBTC-Webhooks/1.0")
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(target = %target, "Sending test webhooks");

    let mut failures = 0;
    for kind in PaymentEventType::ALL {
        let event = sample_event(kind, Utc::now().timestamp_millis());
        let event_id = event["id"].as_str().unwrap_or_default().to_string();
        let body = event.to_string();
        let signature = sign_payload(secret.as_bytes(), Utc::now().timestamp(), body.as_bytes());

        let result = client
            .post(&target)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER.as_str(), signature)
            .header(EVENT_TYPE_HEADER.as_str(), kind.as_str())
            .header(EVENT_ID_HEADER.as_str(), event_id.as_str())
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                if status.is_success() {
                    tracing::info!(event_type = %kind, event_id = %event_id, status = %status, response = %text, "Webhook accepted");
                } else {
                    failures += 1;
                    tracing::warn!(event_type = %kind, event_id = %event_id, status = %status, response = %text, "Webhook rejected");
                }
            }
            Err(e) => {
                failures += 1;
                tracing::error!(event_type = %kind, error = %e, "Failed to send webhook");
            }
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
