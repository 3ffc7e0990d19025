//! # Cart API Server
//!
//! Loads configuration, installs logging and serves the cart evaluator over
//! HTTP until Ctrl+C or SIGTERM.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use cartwise_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config comes first so the log level can come from it
    let config = ApiConfig::load(None).context("Failed to load configuration")?;
    cartwise_api::init_tracing(&config.logging);

    info!("Starting Cartwise cart API...");
    info!(
        max_body_bytes = config.server.max_body_bytes,
        log_format = ?config.logging.format,
        "Configuration loaded"
    );

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(%addr, "Listening");

    let app = cartwise_api::router(&config.server);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
