//! HTTP adapters - REST API implementations.
//!
//! - `webhook` - Inbound sBTC Pay payment events
//! - `storefront` - Product and customer proxy endpoints
//! - `app` - Router assembly and middleware stack

pub mod app;
pub mod error;
pub mod middleware;
pub mod storefront;
pub mod webhook;

pub use app::{api_router, build_app, webhook_guard, with_middleware};
pub use error::ErrorResponse;
pub use storefront::{storefront_routes, StorefrontAppState};
pub use webhook::{webhook_routes, WebhookAppState};
