//! HTTP handlers for the storefront proxy endpoints.
//!
//! These forward read-only requests to sBTC Pay with the merchant API key,
//! which never reaches the browser.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::ports::{CustomerHistory, PaymentProcessor, ProcessorError};

use super::dto::ProductsResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct StorefrontAppState {
    pub processor: Arc<dyn PaymentProcessor>,
}

impl StorefrontAppState {
    pub fn new(processor: Arc<dyn PaymentProcessor>) -> Self {
        Self { processor }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/products - List the merchant's products
pub async fn list_products(State(state): State<StorefrontAppState>) -> impl IntoResponse {
    match state.processor.list_products().await {
        Ok(products) => (StatusCode::OK, Json(ProductsResponse::ok(products))),
        Err(ProcessorError::Upstream { status, message }) => {
            tracing::warn!(status, message = %message, "Failed to fetch products");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(ProductsResponse::failed("UPSTREAM_ERROR", message)))
        }
        Err(err) => {
            tracing::error!(error = %err, "Error fetching products");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProductsResponse::failed(
                    "INTERNAL_ERROR",
                    "Failed to fetch products",
                )),
            )
        }
    }
}

/// GET /api/customers/:identifier - Look up a customer's payment history
pub async fn get_customer(
    State(state): State<StorefrontAppState>,
    Path(identifier): Path<String>,
) -> Result<Json<CustomerHistory>, StorefrontApiError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(StorefrontApiError::MissingIdentifier);
    }

    state
        .processor
        .get_customer(identifier)
        .await?
        .map(Json)
        .ok_or(StorefrontApiError::CustomerNotFound)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for the storefront endpoints.
#[derive(Debug)]
pub enum StorefrontApiError {
    MissingIdentifier,
    CustomerNotFound,
    Processor(ProcessorError),
}

impl From<ProcessorError> for StorefrontApiError {
    fn from(err: ProcessorError) -> Self {
        Self::Processor(err)
    }
}

impl IntoResponse for StorefrontApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match &self {
            StorefrontApiError::MissingIdentifier => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "Customer identifier is required",
            ),
            StorefrontApiError::CustomerNotFound => (
                StatusCode::NOT_FOUND,
                "CUSTOMER_NOT_FOUND",
                "Customer not found",
            ),
            StorefrontApiError::Processor(err) => {
                tracing::error!(error = %err, "Error fetching customer");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        };

        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}
