//! sBTC Pay adapter.

mod client;

pub use client::{SbtcPayClient, SbtcPayConfig, DEFAULT_API_URL};
