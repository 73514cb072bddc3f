//! Payment configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// sBTC Pay merchant API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the sBTC Pay API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Merchant secret API key
    pub api_key: SecretString,

    /// Timeout for each outbound API call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl PaymentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("SBTC_STOREFRONT__PAYMENT__API_KEY"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        let is_https = self.api_url.starts_with("https://");
        if !is_https && !self.api_url.starts_with("http://") {
            return Err(ValidationError::InvalidPaymentApiUrl(self.api_url.clone()));
        }
        if environment == Environment::Production && !is_https {
            return Err(ValidationError::PaymentApiMustBeHttps);
        }

        Ok(())
    }
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
