//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid sBTC Pay API URL: {0}")]
    InvalidPaymentApiUrl(String),

    #[error("sBTC Pay API URL must use HTTPS in production")]
    PaymentApiMustBeHttps,

    #[error("Webhook signature tolerance must be greater than zero")]
    InvalidSignatureTolerance,

    #[error("Seen event capacity must be greater than zero")]
    InvalidSeenEventCapacity,
}
