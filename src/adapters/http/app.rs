//! Application router assembly.
//!
//! Wires configuration into the webhook guard and the sBTC Pay client, mounts
//! both routers under `/api`, and applies the tower-http middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use secrecy::ExposeSecret;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::payment_events::logging_handlers;
use crate::adapters::sbtc_pay::{SbtcPayClient, SbtcPayConfig};
use crate::application::{HandleInboundWebhookHandler, PaymentEventDispatcher};
use crate::config::{AppConfig, ServerConfig};
use crate::domain::webhook::{SeenEventSet, WebhookVerifier};
use crate::ports::{PaymentProcessor, ProcessorError};

use super::middleware::{handle_panic, MakeRequestUuid};
use super::storefront::{storefront_routes, StorefrontAppState};
use super::webhook::{webhook_routes, WebhookAppState};

/// Routes under `/api`, without middleware.
pub fn api_router(webhook: WebhookAppState, storefront: StorefrontAppState) -> Router {
    let api = Router::new()
        .merge(webhook_routes().with_state(webhook))
        .merge(storefront_routes().with_state(storefront));

    Router::new().nest("/api", api)
}

/// Applies the middleware stack. Layers run outermost-last.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS for the storefront frontend. With no configured origins, any origin
/// may call the API.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

/// Builds the webhook guard from configuration, with the logging handlers.
pub fn webhook_guard(config: &AppConfig) -> HandleInboundWebhookHandler {
    let verifier = WebhookVerifier::with_tolerance(
        config.webhook.secret.expose_secret().clone(),
        config.webhook.signature_tolerance_secs,
    );

    HandleInboundWebhookHandler::new(
        Arc::new(SeenEventSet::new(config.webhook.seen_event_capacity)),
        Arc::new(verifier),
        Arc::new(PaymentEventDispatcher::with_handlers(logging_handlers())),
    )
}

/// Builds the complete application.
///
/// # Errors
///
/// Returns `ProcessorError` if the sBTC Pay client cannot be constructed.
pub fn build_app(config: &AppConfig) -> Result<Router, ProcessorError> {
    let client = SbtcPayClient::new(
        SbtcPayConfig::new(config.payment.api_key.clone())
            .with_base_url(config.payment.api_url.clone())
            .with_timeout(config.payment.request_timeout()),
    )?;
    let processor: Arc<dyn PaymentProcessor> = Arc::new(client);

    let router = api_router(
        WebhookAppState::new(Arc::new(webhook_guard(config))),
        StorefrontAppState::new(processor),
    );

    Ok(with_middleware(router, &config.server))
}
