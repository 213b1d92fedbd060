//! Backend abstraction for database drivers.
//!
//! This module defines the [`Backend`] trait, which covers the lifecycle of a
//! connection pool: identifying the driver, checking connectivity, and
//! draining the pool at shutdown.

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
    /// PostgreSQL database.
    Postgres,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Postgres => write!(f, "postgres"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "postgres" | "postgresql" => Ok(BackendKind::Postgres),
            other => Err(format!(
                "unknown storage backend '{}' (expected 'postgres' or 'sqlite')",
                other
            )),
        }
    }
}

/// Lifecycle operations shared by every database backend.
///
/// The pool behind a backend is acquired once at startup, shared by all
/// requests, and released through [`Backend::close`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend kind.
    fn kind(&self) -> BackendKind;

    /// Returns the backend name.
    fn name(&self) -> &'static str;

    /// Round-trips a trivial query on a pooled connection.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Closes the pool. Waiting and later checkouts fail afterwards.
    async fn close(&self);
}
