//! PostgreSQL backend implementation.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime, SslMode};
use serde::{Deserialize, Serialize};
use tokio_postgres::NoTls;

use crate::core::{Backend, BackendKind};
use crate::error::{BackendError, StorageError, StorageResult};

/// PostgreSQL backend for patient record storage.
pub struct PostgresBackend {
    pool: Pool,
    config: PostgresConfig,
}

impl Debug for PostgresBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresBackend")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("dbname", &self.config.dbname)
            .field("pool_status", &self.pool.status())
            .finish_non_exhaustive()
    }
}

/// Configuration for the PostgreSQL backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// PostgreSQL host.
    #[serde(default = "default_host")]
    pub host: String,

    /// PostgreSQL port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name.
    #[serde(default = "default_dbname")]
    pub dbname: String,

    /// Database user.
    #[serde(default = "default_user")]
    pub user: String,

    /// Database password.
    #[serde(default)]
    pub password: Option<String>,

    /// SSL mode.
    #[serde(default)]
    pub ssl_mode: PostgresSslMode,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// SSL mode for PostgreSQL connections.
///
/// Connections are made without a TLS connector, so `prefer` always falls
/// back to plaintext and there is no mode that requires TLS.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostgresSslMode {
    /// Disable SSL.
    Disable,
    /// Prefer SSL, but allow non-SSL.
    #[default]
    Prefer,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5434
}

fn default_dbname() -> String {
    "pacientes_db".to_string()
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_max_connections() -> usize {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: Some("admin".to_string()),
            ssl_mode: PostgresSslMode::default(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl PostgresBackend {
    /// Creates a new PostgreSQL backend with the given configuration.
    ///
    /// A connection is checked out once so that an unreachable database is
    /// reported here rather than on the first request.
    pub async fn new(config: PostgresConfig) -> StorageResult<Self> {
        let pool = Self::create_pool(&config)?;

        // Verify connectivity
        let client = pool.get().await.map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "postgres".to_string(),
                message: e.to_string(),
            })
        })?;
        drop(client);

        tracing::info!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool, config })
    }

    fn create_pool(config: &PostgresConfig) -> StorageResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(config.host.clone());
        cfg.port = Some(config.port);
        cfg.dbname = Some(config.dbname.clone());
        cfg.user = Some(config.user.clone());
        cfg.password = config.password.clone();
        cfg.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        cfg.ssl_mode = Some(match config.ssl_mode {
            PostgresSslMode::Disable => SslMode::Disable,
            PostgresSslMode::Prefer => SslMode::Prefer,
        });

        let pool = cfg
            .builder(NoTls)
            .map_err(|e| {
                StorageError::Backend(BackendError::Internal {
                    backend_name: "postgres".to_string(),
                    message: format!("Failed to create pool builder: {}", e),
                    source: None,
                })
            })?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| {
                StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: "postgres".to_string(),
                    message: e.to_string(),
                })
            })?;

        Ok(pool)
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> StorageResult<()> {
        let client = self.get_client().await?;
        super::schema::initialize_schema(&client).await
    }

    /// Get a client from the pool.
    pub(crate) async fn get_client(&self) -> StorageResult<deadpool_postgres::Client> {
        self.pool.get().await.map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "postgres".to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|_| BackendError::Unavailable {
                backend_name: "postgres".to_string(),
                message: "Failed to get connection".to_string(),
            })?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| BackendError::Internal {
                backend_name: "postgres".to_string(),
                message: format!("Health check failed: {}", e),
                source: None,
            })?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close();
        tracing::info!("PostgreSQL connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PostgresConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5434);
        assert_eq!(config.dbname, "pacientes_db");
        assert_eq!(config.user, "admin");
        assert_eq!(config.password.as_deref(), Some("admin"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.ssl_mode, PostgresSslMode::Prefer);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: PostgresConfig =
            serde_json::from_str(r#"{"host": "db", "ssl_mode": "disable"}"#).unwrap();
        assert_eq!(config.host, "db");
        assert_eq!(config.port, 5434);
        assert_eq!(config.ssl_mode, PostgresSslMode::Disable);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_config_rejects_require_ssl() {
        let result: Result<PostgresConfig, _> =
            serde_json::from_str(r#"{"ssl_mode": "require"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_pool_does_not_connect() {
        let config = PostgresConfig {
            port: 1,
            ..Default::default()
        };
        assert!(PostgresBackend::create_pool(&config).is_ok());
    }
}
