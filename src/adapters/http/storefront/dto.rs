//! Response DTOs for the storefront proxy endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::Product;

/// Product catalog response.
///
/// On failure `products` is empty and the error fields are set, so the
/// storefront page can still render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProductsResponse {
    pub fn ok(products: Vec<Product>) -> Self {
        Self {
            products,
            error_code: None,
            message: None,
        }
    }

    pub fn failed(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            products: Vec::new(),
            error_code: Some(error_code.into()),
            message: Some(message.into()),
        }
    }
}
