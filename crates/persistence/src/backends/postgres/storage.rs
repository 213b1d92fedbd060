//! PatientStorage implementation for PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::Row;

use crate::core::PatientStorage;
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{NewPatient, PatientId, PatientRecord};

use super::PostgresBackend;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message,
        source: None,
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

fn row_to_record(row: &Row) -> StorageResult<PatientRecord> {
    let read = |e: tokio_postgres::Error| serialization_error(format!("Failed to read row: {}", e));

    let raw_id: i32 = row.try_get("id").map_err(read)?;
    let id = PatientId::new(i64::from(raw_id))
        .ok_or_else(|| serialization_error(format!("invalid stored id: {}", raw_id)))?;
    let fecha_registro: DateTime<Utc> = row.try_get("fecha_registro").map_err(read)?;

    Ok(PatientRecord {
        id,
        nombre: row.try_get("nombre").map_err(read)?,
        apellido: row.try_get("apellido").map_err(read)?,
        peso: row.try_get("peso").map_err(read)?,
        talla: row.try_get("talla").map_err(read)?,
        diagnostico: row.try_get("diagnostico").map_err(read)?,
        fecha_registro,
    })
}

/// Converts an id to the `SERIAL` column type; ids beyond `i32` cannot exist.
fn to_serial(id: PatientId) -> Option<i32> {
    i32::try_from(id.get()).ok()
}

#[async_trait]
impl PatientStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, patient: NewPatient) -> StorageResult<PatientRecord> {
        let client = self.get_client().await?;

        let row = client
            .query_one(
                "INSERT INTO pacientes (nombre, apellido, peso, talla, diagnostico, fecha_registro)
                 VALUES ($1, $2, $3, $4, $5, NOW())
                 RETURNING id, nombre, apellido, peso, talla, diagnostico, fecha_registro",
                &[
                    &patient.nombre,
                    &patient.apellido,
                    &patient.peso,
                    &patient.talla,
                    &patient.diagnostico,
                ],
            )
            .await
            .map_err(|e| internal_error(format!("Failed to insert patient: {}", e)))?;

        let record = row_to_record(&row)?;
        tracing::debug!(id = %record.id, "Inserted patient");
        Ok(record)
    }

    async fn list_all(&self) -> StorageResult<Vec<PatientRecord>> {
        let client = self.get_client().await?;

        let rows = client
            .query(
                "SELECT id, nombre, apellido, peso, talla, diagnostico, fecha_registro
                 FROM pacientes
                 ORDER BY fecha_registro DESC, id DESC",
                &[],
            )
            .await
            .map_err(|e| internal_error(format!("Failed to list patients: {}", e)))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn get_by_id(&self, id: PatientId) -> StorageResult<Option<PatientRecord>> {
        let Some(serial) = to_serial(id) else {
            return Ok(None);
        };
        let client = self.get_client().await?;

        let row = client
            .query_opt(
                "SELECT id, nombre, apellido, peso, talla, diagnostico, fecha_registro
                 FROM pacientes WHERE id = $1",
                &[&serial],
            )
            .await
            .map_err(|e| internal_error(format!("Failed to read patient: {}", e)))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn delete_by_id(&self, id: PatientId) -> StorageResult<PatientRecord> {
        let not_found = || StorageError::Resource(ResourceError::NotFound { id });
        let serial = to_serial(id).ok_or_else(not_found)?;
        let client = self.get_client().await?;

        let exists = client
            .query_opt("SELECT 1 FROM pacientes WHERE id = $1", &[&serial])
            .await
            .map_err(|e| internal_error(format!("Failed to read patient: {}", e)))?;
        if exists.is_none() {
            return Err(not_found());
        }

        // A concurrent delete may have won between the check and the delete.
        let row = client
            .query_opt(
                "DELETE FROM pacientes WHERE id = $1
                 RETURNING id, nombre, apellido, peso, talla, diagnostico, fecha_registro",
                &[&serial],
            )
            .await
            .map_err(|e| internal_error(format!("Failed to delete patient: {}", e)))?
            .ok_or_else(not_found)?;

        tracing::debug!(%id, "Deleted patient");
        row_to_record(&row)
    }
}
