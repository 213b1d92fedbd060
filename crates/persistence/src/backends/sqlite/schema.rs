//! SQLite schema definition.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Creates the `pacientes` table and its index if they do not exist.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pacientes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            apellido TEXT NOT NULL,
            peso REAL NOT NULL CHECK (peso > 0 AND peso <= 500),
            talla REAL NOT NULL CHECK (talla > 0 AND talla <= 3),
            diagnostico TEXT NOT NULL,
            fecha_registro TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| sqlite_error(format!("Failed to create pacientes table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_pacientes_fecha_registro
            ON pacientes(fecha_registro DESC, id DESC)",
        [],
    )
    .map_err(|e| sqlite_error(format!("Failed to create index: {}", e)))?;

    Ok(())
}

fn sqlite_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}
