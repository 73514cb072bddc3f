//! sBTC Storefront - Demo merchant backend for sBTC Pay
//!
//! This crate proxies the product catalog and customer lookups to sBTC Pay and
//! ingests signed payment webhooks, verifying and deduplicating each event
//! before its side effects run.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
