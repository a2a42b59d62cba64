//! triage-server library crate
//!
//! Exposes `build_app`, `config` and the resolver for integration tests.
//! The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
mod error;
mod middleware;
mod routes;

use std::sync::Arc;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use triage_core::{RuleTable, RuleTableError};

use ai::{Classifier, GeminiClient, Resolver};
use config::Config;

pub use middleware::REQUEST_ID_HEADER;
pub use routes::SOURCE_HEADER;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

/// Errors that stop the server from starting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Rules(#[from] RuleTableError),

    #[error("Failed to build LLM client: {0}")]
    Client(#[from] triage_core::ClassifierError),
}

/// Load the rule table named in the config, or the built-in one
pub fn load_rules(config: &Config) -> Result<RuleTable, RuleTableError> {
    match &config.rules_path {
        Some(path) => RuleTable::load(path),
        None => Ok(RuleTable::builtin()),
    }
}

/// Build the resolver from configuration: rule table plus optional Gemini client
pub fn build_resolver(config: &Config) -> Result<Resolver, StartupError> {
    let rules = load_rules(config)?;
    let classifier = GeminiClient::from_config(config)?
        .map(|client| Arc::new(client) as Arc<dyn Classifier>);

    Ok(Resolver::new(rules, classifier, config.llm_timeout))
}

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port.
pub fn build_app(resolver: Resolver, config: &Config) -> Router {
    // Create rate limiter
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Rate-limited routes
    let triage_routes = routes::triage_routes()
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // Install Prometheus metrics recorder.
    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic; the second install is
    // silently ignored and we still get a valid handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    let public_routes = Router::new()
        .route("/metadata", get(routes::metadata::get))
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    // Build CORS layer
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build application
    Router::new()
        .merge(public_routes)
        .merge(triage_routes)
        .with_state(AppState { resolver })
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
