//! Integration tests for the sBTC Pay REST client against a mock server.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sbtc_storefront::adapters::{SbtcPayClient, SbtcPayConfig};
use sbtc_storefront::ports::{PaymentProcessor, ProcessorError};

const API_KEY: &str = "sk_test_integration";

fn client_for(server: &MockServer) -> SbtcPayClient {
    SbtcPayClient::new(
        SbtcPayConfig::new(SecretString::new(API_KEY.to_string())).with_base_url(server.uri()),
    )
    .unwrap()
}

fn product_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Bitcoin Sticker Pack",
        "description": "Ten stickers",
        "price": 25000,
        "price_usd": 16.5,
        "images": ["https://cdn.example.com/stickers.png"],
        "created": 1704067200,
        "checkout_url": format!("https://pay.example.com/checkout/{}", id)
    })
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn list_products_sends_bearer_key_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [product_json("prod_1"), product_json("prod_2")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server).list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "prod_1");
    assert_eq!(products[0].price, Some(25000));
    assert_eq!(
        products[1].checkout_url.as_deref(),
        Some("https://pay.example.com/checkout/prod_2")
    );
}

#[tokio::test]
async fn list_products_passes_nulls_and_unknown_fields_through() {
    let server = MockServer::start().await;
    let mut product = product_json("prod_1");
    product["description"] = json!(null);
    product["active"] = json!(true);
    product["metadata"] = json!({ "sku": "STK-10", "tags": ["limited"] });
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [product] })))
        .mount(&server)
        .await;

    let products = client_for(&server).list_products().await.unwrap();

    assert_eq!(products.len(), 1);
    assert!(products[0].description.is_none());
    let forwarded = serde_json::to_value(&products[0]).unwrap();
    assert_eq!(forwarded["active"], true);
    assert_eq!(
        forwarded["metadata"],
        json!({ "sku": "STK-10", "tags": ["limited"] })
    );
    assert_eq!(forwarded["price"], 25000);
}

#[tokio::test]
async fn list_products_without_data_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "list" })))
        .mount(&server)
        .await;

    let products = client_for(&server).list_products().await.unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn list_products_reports_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_products().await.unwrap_err();

    assert_eq!(
        err,
        ProcessorError::Upstream {
            status: 503,
            message: "maintenance".to_string()
        }
    );
}

#[tokio::test]
async fn list_products_rejects_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "nope" })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_products().await.unwrap_err();

    assert!(matches!(err, ProcessorError::Decode(_)));
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn get_customer_returns_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/customer@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "customer_history",
            "customer": {
                "identifier": "customer@example.com",
                "email": "customer@example.com",
                "address": null
            },
            "summary": {
                "total_payments": 3,
                "successful_payments": 2,
                "total_spent": 50000,
                "total_spent_usd": 33.0,
                "currency": "sbtc",
                "unique_products_purchased": 1,
                "first_payment": 1704067200,
                "last_payment": 1704153600
            },
            "products": [
                { "id": "prod_1", "name": "Bitcoin Sticker Pack", "purchase_count": 2 }
            ],
            "transactions": [{
                "payment_intent_id": "pi_1",
                "amount": 25000,
                "status": "succeeded",
                "created": 1704067200,
                "product": { "id": "prod_1", "name": "Bitcoin Sticker Pack" }
            }]
        })))
        .mount(&server)
        .await;

    let history = client_for(&server)
        .get_customer("customer@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(history.customer.email.as_deref(), Some("customer@example.com"));
    assert_eq!(history.summary.successful_payments, Some(2));
    assert_eq!(history.products.as_ref().unwrap()[0].purchase_count, Some(2));
    assert_eq!(history.transactions.as_ref().unwrap()[0].payment_intent_id, "pi_1");
}

#[tokio::test]
async fn customer_history_tolerates_nulls_and_keeps_unknown_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "customer_history",
            "customer": {
                "identifier": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "address": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "email": null
            },
            "summary": {
                "total_payments": 0,
                "successful_payments": 0,
                "total_spent": 0,
                "currency": null,
                "first_payment": null,
                "last_payment": null,
                "refunded_payments": 0
            },
            "products": null,
            "transactions": [],
            "livemode": false
        })))
        .mount(&server)
        .await;

    let history = client_for(&server)
        .get_customer("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7")
        .await
        .unwrap()
        .unwrap();

    assert!(history.customer.email.is_none());
    assert!(history.summary.currency.is_none());
    assert!(history.products.is_none());
    let forwarded = serde_json::to_value(&history).unwrap();
    assert_eq!(forwarded["livemode"], false);
    assert_eq!(forwarded["summary"]["refunded_payments"], 0);
}

#[tokio::test]
async fn unknown_customer_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/nobody@example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .get_customer("nobody@example.com")
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn customer_server_error_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/someone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).get_customer("someone").await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(500));
}

#[tokio::test]
async fn customer_identifier_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/a%2Fb%20c%3Fd"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).get_customer("a/b c?d").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn unreachable_processor_is_network_error() {
    let client = SbtcPayClient::new(
        SbtcPayConfig::new(SecretString::new(API_KEY.to_string()))
            .with_base_url("http://127.0.0.1:9"),
    )
    .unwrap();

    let err = client.list_products().await.unwrap_err();

    assert!(matches!(err, ProcessorError::Network(_)));
}
