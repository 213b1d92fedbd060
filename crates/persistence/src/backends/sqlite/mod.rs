//! SQLite backend implementation.
//!
//! This module provides a SQLite implementation of the storage traits. It
//! supports both in-memory databases (great for testing) and file-based
//! databases (for development).
//!
//! # Example
//!
//! ```no_run
//! use pacientes_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pacientes (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     nombre TEXT NOT NULL,
//!     apellido TEXT NOT NULL,
//!     peso REAL NOT NULL,
//!     talla REAL NOT NULL,
//!     diagnostico TEXT NOT NULL,
//!     fecha_registro TEXT NOT NULL  -- RFC 3339, UTC, microseconds
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
