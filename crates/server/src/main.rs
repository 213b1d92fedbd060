//! Pacientes registry server
//!
//! Serves the patient registry JSON API over a PostgreSQL or SQLite store.

use std::sync::Arc;

use clap::Parser;
use pacientes_persistence::core::{Backend, BackendKind, PatientStorage};
use pacientes_rest::{ServerConfig, create_app_with_shared, init_logging, shutdown_signal};
use tracing::{error, info};

#[cfg(feature = "sqlite")]
use pacientes_persistence::backends::sqlite::SqliteBackend;

#[cfg(feature = "postgres")]
use pacientes_persistence::backends::postgres::PostgresBackend;

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    info!(database = %config.sqlite_path, "Initializing SQLite backend");

    let backend = SqliteBackend::with_config(&config.sqlite_path, config.sqlite_config())?;
    backend.init_schema()?;

    Ok(backend)
}

/// Creates and initializes a PostgreSQL backend from the `DB_*` settings.
#[cfg(feature = "postgres")]
async fn create_postgres_backend(config: &ServerConfig) -> anyhow::Result<PostgresBackend> {
    info!(
        host = %config.db_host,
        port = config.db_port,
        database = %config.db_name,
        "Initializing PostgreSQL backend"
    );

    let backend = PostgresBackend::new(config.postgres_config()).await?;
    backend.init_schema().await?;

    Ok(backend)
}

/// Checks connectivity, serves until a shutdown signal arrives, then drains
/// the pool.
async fn serve<S>(backend: S, config: ServerConfig) -> anyhow::Result<()>
where
    S: PatientStorage + Backend + Send + Sync + 'static,
{
    if let Err(e) = backend.health_check().await {
        error!(backend = backend.name(), error = %e, "Database is unreachable");
        std::process::exit(1);
    }
    info!(backend = backend.name(), "Database connection verified");

    let backend = Arc::new(backend);
    let app = create_app_with_shared(Arc::clone(&backend), config.clone());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    backend.close().await;
    info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.backend,
        "Starting Pacientes registry server"
    );

    match config.backend {
        BackendKind::Sqlite => start_sqlite(config).await,
        BackendKind::Postgres => start_postgres(config).await,
    }
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    serve(backend, config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p pacientes-server --features sqlite"
    )
}

/// Starts the server with the PostgreSQL backend.
#[cfg(feature = "postgres")]
async fn start_postgres(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_postgres_backend(&config).await?;
    serve(backend, config).await
}

/// Fallback when postgres feature is not enabled.
#[cfg(not(feature = "postgres"))]
async fn start_postgres(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The postgres backend requires the 'postgres' feature. \
         Build with: cargo build -p pacientes-server --features postgres"
    )
}

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("At least one database backend feature must be enabled");
