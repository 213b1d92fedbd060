//! # pacientes-rest - Patient Registry REST API
//!
//! This crate provides the JSON HTTP API of the patient registry: handlers
//! that validate and store patient records, the shared response envelope,
//! error shaping, server configuration and the logging bootstrap.
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - `sqlite` - SQLite backend (default, great for development)
//! - `postgres` - PostgreSQL backend (production)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pacientes_rest::{create_app, shutdown_signal};
//! use pacientes_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Create a storage backend
//!     let backend = SqliteBackend::open("pacientes.db")?;
//!     backend.init_schema()?;
//!
//!     // Create the Axum application
//!     let app = create_app(backend);
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//!     axum::serve(listener, app)
//!         .with_graceful_shutdown(shutdown_signal())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | create | POST | `/api/pacientes` |
//! | list | GET | `/api/pacientes` |
//! | read | GET | `/api/pacientes/{id}` |
//! | delete | DELETE | `/api/pacientes/{id}` |
//! | health | GET | `/api/health` |
//!
//! Every body uses the [`Envelope`](responses::Envelope) shape. Unmatched
//! routes answer 404 `{"success": false, "message": "route not found"}`.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers for each operation
//! - [`extractors`] - Axum extractors for the id path and JSON body
//! - [`responses`] - Response envelope
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::any::Any;
use std::sync::Arc;

use axum::{Router, response::IntoResponse};
use pacientes_persistence::core::{Backend, PatientStorage};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
///
/// # Example
///
/// ```rust,ignore
/// use pacientes_rest::create_app;
/// use pacientes_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let app = create_app(backend);
/// ```
pub fn create_app<S>(storage: S) -> Router
where
    S: PatientStorage + Backend + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use pacientes_rest::{create_app_with_config, ServerConfig};
/// use pacientes_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     enable_cors: false,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: PatientStorage + Backend + Send + Sync + 'static,
{
    create_app_with_shared(Arc::new(storage), config)
}

/// Creates the Axum application around a backend the caller keeps a handle
/// to, so the pool can be closed after the server stops.
pub fn create_app_with_shared<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: PatientStorage + Backend + Send + Sync + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    // Create application state
    let state = AppState::new(storage, config.clone());

    // Build the router with all API routes
    let router = routing::create_routes(state);

    with_middleware(router, &config)
}

/// Applies the middleware stack: request tracing, panic recovery and CORS.
///
/// Exposed so that extra routes can be merged before the stack is applied.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Turns a handler panic into the generic 500 envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    RestError::InternalError {
        message: format!("handler panicked: {}", detail),
    }
    .into_response()
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]);

    // Configure origins
    if config.cors_origins.trim() == "*" {
        cors.allow_origin(AnyOrigin)
    } else {
        let origins: Vec<http::HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pacientes_rest={level},pacientes_persistence={level},pacientes_server={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Resolves when the process receives Ctrl+C, or SIGTERM on Unix.
///
/// Pass to `axum::serve(..).with_graceful_shutdown(..)`: in-flight requests
/// finish before `serve` returns.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
