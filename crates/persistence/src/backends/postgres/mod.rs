//! PostgreSQL backend implementation.
//!
//! This module provides the production implementation of the storage traits,
//! with connection pooling via deadpool-postgres and native `TIMESTAMPTZ`
//! registration timestamps taken from the database clock.
//!
//! # Example
//!
//! ```no_run
//! use pacientes_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
//!
//! # async fn main_example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a PostgreSQL backend
//! let config = PostgresConfig::default();
//! let backend = PostgresBackend::new(config).await?;
//!
//! // Initialize the schema
//! backend.init_schema().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pacientes (
//!     id SERIAL PRIMARY KEY,
//!     nombre VARCHAR(50) NOT NULL,
//!     apellido VARCHAR(50) NOT NULL,
//!     peso DOUBLE PRECISION NOT NULL,
//!     talla DOUBLE PRECISION NOT NULL,
//!     diagnostico VARCHAR(500) NOT NULL,
//!     fecha_registro TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

mod backend;
pub(crate) mod schema;
mod storage;

pub use backend::{PostgresBackend, PostgresConfig, PostgresSslMode};
