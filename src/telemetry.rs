//! Tracing subscriber setup.
//!
//! Log filtering comes from `RUST_LOG` when set, otherwise from
//! `server.log_level`. Output is human-readable by default and JSON lines when
//! `server.log_json` is enabled.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Builds the log filter, preferring `RUST_LOG` over the configured level.
pub fn env_filter(config: &ServerConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Fails if the filter directive is invalid or a subscriber is already set.
pub fn init_tracing(config: &ServerConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::info!(
        environment = ?config.environment,
        json = config.log_json,
        "Tracing initialized"
    );
    Ok(())
}
