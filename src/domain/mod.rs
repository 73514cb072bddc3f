//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `webhook` - Payment event verification, deduplication and error taxonomy

pub mod webhook;
