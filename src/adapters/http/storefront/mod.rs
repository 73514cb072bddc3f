//! HTTP adapter for the storefront proxy endpoints.
//!
//! - `GET /api/products` - Product catalog from sBTC Pay
//! - `GET /api/customers/:identifier` - Customer payment history from sBTC Pay

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ProductsResponse;
pub use handlers::{get_customer, list_products, StorefrontApiError, StorefrontAppState};
pub use routes::storefront_routes;
