//! Axum router configuration for the storefront proxy endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_customer, list_products, StorefrontAppState};

/// Create the storefront router.
///
/// # Routes
/// - `GET /products` - Product catalog
/// - `GET /customers/:identifier` - Customer payment history by email or address
pub fn storefront_routes() -> Router<StorefrontAppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/customers/:identifier", get(get_customer))
}
