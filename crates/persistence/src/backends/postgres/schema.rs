//! PostgreSQL schema definition.

use crate::error::{BackendError, StorageResult};

/// Creates the `pacientes` table and its index if they do not exist.
pub async fn initialize_schema(client: &deadpool_postgres::Client) -> StorageResult<()> {
    client
        .batch_execute(
            "CREATE TABLE IF NOT EXISTS pacientes (
                id SERIAL PRIMARY KEY,
                nombre VARCHAR(50) NOT NULL,
                apellido VARCHAR(50) NOT NULL,
                peso DOUBLE PRECISION NOT NULL CHECK (peso > 0 AND peso <= 500),
                talla DOUBLE PRECISION NOT NULL CHECK (talla > 0 AND talla <= 3),
                diagnostico VARCHAR(500) NOT NULL,
                fecha_registro TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE INDEX IF NOT EXISTS idx_pacientes_fecha_registro
                ON pacientes (fecha_registro DESC, id DESC);",
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create pacientes table: {}", e)))?;

    tracing::debug!("PostgreSQL schema initialized");
    Ok(())
}

fn pg_error(message: String) -> crate::error::StorageError {
    crate::error::StorageError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message,
        source: None,
    })
}
