//! triage-server: hospital department recommendation HTTP server entrypoint.

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_server::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up GOOGLE_API_KEY and friends from a local .env, if any
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    // Load configuration
    let config = Config::from_env();

    // A bad rule file or HTTP client setup aborts startup
    let resolver = triage_server::build_resolver(&config)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to initialise triage resolver"))?;

    // Log startup info
    match &config.rules_path {
        Some(path) => tracing::info!(
            path = %path.display(),
            keywords = resolver.rules().len(),
            "Loaded rule table from file"
        ),
        None => tracing::info!(keywords = resolver.rules().len(), "Using built-in rule table"),
    }
    if resolver.model_enabled() {
        tracing::info!(
            model = %config.llm_model,
            timeout_secs = config.llm_timeout.as_secs(),
            "GOOGLE_API_KEY configured, LLM classification enabled"
        );
    } else {
        tracing::warn!("GOOGLE_API_KEY not set, every request uses the rule table");
    }
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    // Build application
    let app = triage_server::build_app(resolver, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Starting triage server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
