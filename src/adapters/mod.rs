//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routers for the webhook and storefront endpoints
//! - `payment_events` - Side-effect handlers for verified payment events
//! - `sbtc_pay` - sBTC Pay REST API client

pub mod http;
pub mod payment_events;
pub mod sbtc_pay;

pub use payment_events::logging_handlers;
pub use sbtc_pay::{SbtcPayClient, SbtcPayConfig};
