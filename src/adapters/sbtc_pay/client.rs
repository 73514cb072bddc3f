//! sBTC Pay merchant API client.
//!
//! Implements the `PaymentProcessor` port over the sBTC Pay REST API.
//! Requests carry the merchant API key as a bearer token. Calls are made once
//! with a per-request timeout; failures are reported to the caller as-is.
//!
//! # Configuration
//!
//! ```ignore
//! let config = SbtcPayConfig::new(api_key).with_base_url("https://pay.example.com");
//! let client = SbtcPayClient::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{CustomerHistory, PaymentProcessor, ProcessorError, Product};

/// Default base URL of a locally running sBTC Pay instance.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// sBTC Pay API configuration.
#[derive(Clone)]
pub struct SbtcPayConfig {
    /// Merchant secret API key.
    api_key: SecretString,

    /// Base URL of the sBTC Pay deployment.
    api_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl SbtcPayConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Products are returned inside a list envelope.
#[derive(Debug, Deserialize)]
struct ProductList {
    #[serde(default)]
    data: Option<Vec<Product>>,
}

/// sBTC Pay REST client.
pub struct SbtcPayClient {
    config: SbtcPayConfig,
    base_url: Url,
    http_client: reqwest::Client,
}

impl SbtcPayClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the base URL cannot carry a path, or `Network`
    /// if the HTTP client cannot be built.
    pub fn new(config: SbtcPayConfig) -> Result<Self, ProcessorError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ProcessorError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProcessorError::InvalidUrl(config.api_url.clone()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProcessorError::Network(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            http_client,
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProcessorError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProcessorError::InvalidUrl(self.config.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, ProcessorError> {
        tracing::debug!(url = %url, "Calling sBTC Pay");

        self.http_client
            .get(url)
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| ProcessorError::Network(e.to_string()))
    }
}

async fn upstream_error(response: reqwest::Response) -> ProcessorError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body
    };
    ProcessorError::Upstream {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PaymentProcessor for SbtcPayClient {
    async fn list_products(&self) -> Result<Vec<Product>, ProcessorError> {
        let url = self.endpoint(&["api", "v1", "products"])?;
        let response = self.get(url).await?;

        if !response.status().is_success() {
            let err = upstream_error(response).await;
            tracing::error!(error = %err, "sBTC Pay list_products failed");
            return Err(err);
        }

        let list: ProductList = response
            .json()
            .await
            .map_err(|e| ProcessorError::Decode(e.to_string()))?;

        Ok(list.data.unwrap_or_default())
    }

    async fn get_customer(
        &self,
        identifier: &str,
    ) -> Result<Option<CustomerHistory>, ProcessorError> {
        let url = self.endpoint(&["api", "v1", "customers", identifier])?;
        let response = self.get(url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let err = upstream_error(response).await;
            tracing::error!(error = %err, "sBTC Pay get_customer failed");
            return Err(err);
        }

        let history = response
            .json()
            .await
            .map_err(|e| ProcessorError::Decode(e.to_string()))?;

        Ok(Some(history))
    }
}
