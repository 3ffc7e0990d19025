//! # Cartwise Cart API
//!
//! HTTP front for `cartwise-core`: reads a cart from JSON, checks its
//! structure, evaluates it and renders the result.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cart API Server                                │
//! │                                                                         │
//! │  Client ──► axum (3000) ──► handlers ──► params ──► cartwise-core       │
//! │                 │               │                                       │
//! │                 │               └──► ApiError ──► 4xx JSON              │
//! │                 └──► body limit (413)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - Defaults, TOML file and environment overrides
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`handlers`] - Route handlers and response bodies
//! - [`params`] - Presence, shape and permit-list checks

pub mod config;
pub mod error;
pub mod handlers;
pub mod params;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingSettings, ServerSettings};

/// Builds the application router.
pub fn router(settings: &ServerSettings) -> Router {
    Router::new()
        .route("/cart", post(handlers::create_cart))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(settings: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match settings.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
