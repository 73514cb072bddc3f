//! Payment processor port for the sBTC Pay merchant API.
//!
//! The storefront only reads from the processor: the product catalog and a
//! customer's purchase history. Payments themselves are created and settled
//! by sBTC Pay and reported back through webhooks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Port for read-only calls to the payment processor.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Lists the merchant's products.
    async fn list_products(&self) -> Result<Vec<Product>, ProcessorError>;

    /// Fetches the payment history of a customer by email or Stacks address.
    ///
    /// Returns `Ok(None)` when the processor does not know the customer.
    async fn get_customer(&self, identifier: &str)
        -> Result<Option<CustomerHistory>, ProcessorError>;
}

// Data crossing this port is passed through to the storefront frontend. Only
// the identifying fields are required; everything else may be absent or
// `null`, and fields not modelled here are kept in `extra` so they survive a
// round trip.

/// A product listed for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price in the smallest sBTC unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Creation time (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Hosted checkout page for this product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer's identity, totals, purchased products and transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerHistory {
    /// Object tag, `"customer_history"` as sent by sBTC Pay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    pub customer: CustomerIdentity,

    pub summary: CustomerSummary,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<PurchasedProduct>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<CustomerTransaction>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    /// The email or address the lookup used.
    pub identifier: String,

    /// Stacks address, when the customer has paid from a wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregate payment figures for one customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_payments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_payments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_spent_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_products_purchased: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasedProduct {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One payment made by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTransaction {
    pub payment_intent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<TransactionProduct>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionProduct {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Errors from payment processor calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    /// The configured base URL cannot be turned into a request URL.
    #[error("invalid processor URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The processor answered with a non-success status.
    #[error("processor responded with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("failed to decode processor response: {0}")]
    Decode(String),
}

impl ProcessorError {
    /// The upstream HTTP status, if the processor answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProcessorError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if a retry might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProcessorError::Network(_) => true,
            ProcessorError::Upstream { status, .. } => *status >= 500 || *status == 429,
            ProcessorError::InvalidUrl(_) | ProcessorError::Decode(_) => false,
        }
    }
}
