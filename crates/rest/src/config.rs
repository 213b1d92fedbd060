//! Server configuration for the patient registry API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | 3001 | Server port |
//! | `HOST` | 0.0.0.0 | Host to bind |
//! | `LOG_LEVEL` | info | Log level |
//! | `STORAGE_BACKEND` | postgres | `postgres` or `sqlite` |
//! | `DB_HOST` | localhost | PostgreSQL host |
//! | `DB_PORT` | 5434 | PostgreSQL port |
//! | `DB_NAME` | pacientes_db | Database name |
//! | `DB_USER` | admin | Database user |
//! | `DB_PASSWORD` | admin | Database password |
//! | `DB_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `SQLITE_PATH` | pacientes.db | SQLite database file (`:memory:` allowed) |
//! | `MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `ENABLE_CORS` | true | Enable CORS |
//! | `CORS_ORIGINS` | * | Allowed origins |
//!
//! # Example
//!
//! ```rust
//! use pacientes_rest::ServerConfig;
//!
//! // Create programmatically; the server binary uses `ServerConfig::parse()`
//! let config = ServerConfig {
//!     port: 8080,
//!     host: "127.0.0.1".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "127.0.0.1:8080");
//! ```

use clap::Parser;
use pacientes_persistence::core::BackendKind;

/// Server configuration for the patient registry API.
///
/// This struct can be constructed from command line arguments and environment
/// variables using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "pacientes")]
#[command(about = "Patient registry REST API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Storage backend (postgres or sqlite).
    #[arg(long = "backend", env = "STORAGE_BACKEND", default_value = "postgres")]
    pub backend: BackendKind,

    /// PostgreSQL host.
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// PostgreSQL port.
    #[arg(long, env = "DB_PORT", default_value = "5434")]
    pub db_port: u16,

    /// Database name.
    #[arg(long, env = "DB_NAME", default_value = "pacientes_db")]
    pub db_name: String,

    /// Database user.
    #[arg(long, env = "DB_USER", default_value = "admin")]
    pub db_user: String,

    /// Database password.
    #[arg(long, env = "DB_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub db_password: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// SQLite database file, used when the backend is sqlite.
    #[arg(long, env = "SQLITE_PATH", default_value = "pacientes.db")]
    pub sqlite_path: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Enable CORS.
    #[arg(long, env = "ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            backend: BackendKind::Postgres,
            db_host: "localhost".to_string(),
            db_port: 5434,
            db_name: "pacientes_db".to_string(),
            db_user: "admin".to_string(),
            db_password: "admin".to_string(),
            db_max_connections: 10,
            sqlite_path: "pacientes.db".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            enable_cors: true,
            cors_origins: "*".to_string(),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.db_max_connections == 0 {
            errors.push("Database pool size cannot be 0".to_string());
        }

        match self.backend {
            BackendKind::Postgres => {
                if self.db_host.trim().is_empty() {
                    errors.push("Database host cannot be empty".to_string());
                }
                if self.db_name.trim().is_empty() {
                    errors.push("Database name cannot be empty".to_string());
                }
                if self.db_port == 0 {
                    errors.push("Database port cannot be 0".to_string());
                }
            }
            BackendKind::Sqlite => {
                if self.sqlite_path.trim().is_empty() {
                    errors.push("SQLite path cannot be empty".to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the PostgreSQL pool configuration from the `DB_*` settings.
    #[cfg(feature = "postgres")]
    pub fn postgres_config(&self) -> pacientes_persistence::backends::postgres::PostgresConfig {
        pacientes_persistence::backends::postgres::PostgresConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            dbname: self.db_name.clone(),
            user: self.db_user.clone(),
            password: Some(self.db_password.clone()),
            max_connections: self.db_max_connections as usize,
            ..Default::default()
        }
    }

    /// Builds the SQLite pool configuration.
    #[cfg(feature = "sqlite")]
    pub fn sqlite_config(&self) -> pacientes_persistence::backends::sqlite::SqliteBackendConfig {
        pacientes_persistence::backends::sqlite::SqliteBackendConfig {
            max_connections: self.db_max_connections,
            ..Default::default()
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an in-memory SQLite database and disables
    /// features that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            backend: BackendKind::Sqlite,
            sqlite_path: ":memory:".to_string(),
            max_body_size: 64 * 1024,
            enable_cors: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.backend, BackendKind::Postgres);
        assert_eq!(config.db_port, 5434);
        assert_eq!(config.db_name, "pacientes_db");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_parse_defaults_match_default_impl() {
        let parsed = ServerConfig::try_parse_from(["pacientes"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.db_user, default.db_user);
        assert_eq!(parsed.max_body_size, default.max_body_size);
        assert_eq!(parsed.backend, default.backend);
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "pacientes",
            "--port",
            "8080",
            "--backend",
            "sqlite",
            "--sqlite-path",
            ":memory:",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, BackendKind::Sqlite);
        assert_eq!(config.sqlite_path, ":memory:");
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        let result = ServerConfig::try_parse_from(["pacientes", "--backend", "mongodb"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(ServerConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let config = ServerConfig {
            port: 0,
            db_name: " ".to_string(),
            db_max_connections: 0,
            max_body_size: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("Port")));
        assert!(errors.iter().any(|e| e.contains("Database name")));
        assert!(errors.iter().any(|e| e.contains("pool size")));
        assert!(errors.iter().any(|e| e.contains("body size")));
    }

    #[test]
    fn test_validate_sqlite_ignores_db_settings() {
        let config = ServerConfig {
            backend: BackendKind::Sqlite,
            db_name: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert_eq!(config.backend, BackendKind::Sqlite);
        assert_eq!(config.sqlite_path, ":memory:");
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_postgres_config_from_db_settings() {
        let config = ServerConfig {
            db_host: "db".to_string(),
            db_port: 5432,
            db_max_connections: 4,
            ..Default::default()
        };
        let pg = config.postgres_config();
        assert_eq!(pg.host, "db");
        assert_eq!(pg.port, 5432);
        assert_eq!(pg.dbname, "pacientes_db");
        assert_eq!(pg.password.as_deref(), Some("admin"));
        assert_eq!(pg.max_connections, 4);
    }
}
