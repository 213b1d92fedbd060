//! PatientStorage implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{OptionalExtension, Row, params};

use crate::core::PatientStorage;
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{NewPatient, PatientId, PatientRecord};

use super::SqliteBackend;

const SELECT_COLUMNS: &str = "id, nombre, apellido, peso, talla, diagnostico, fecha_registro";

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

/// Raw column values, before the id and timestamp are checked.
struct RawRow {
    id: i64,
    nombre: String,
    apellido: String,
    peso: f64,
    talla: f64,
    diagnostico: String,
    fecha_registro: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            nombre: row.get(1)?,
            apellido: row.get(2)?,
            peso: row.get(3)?,
            talla: row.get(4)?,
            diagnostico: row.get(5)?,
            fecha_registro: row.get(6)?,
        })
    }

    fn into_record(self) -> StorageResult<PatientRecord> {
        let id = PatientId::new(self.id)
            .ok_or_else(|| serialization_error(format!("invalid stored id: {}", self.id)))?;
        let fecha_registro = DateTime::parse_from_rfc3339(&self.fecha_registro)
            .map_err(|e| {
                serialization_error(format!(
                    "invalid fecha_registro '{}' for patient {}: {}",
                    self.fecha_registro, id, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(PatientRecord {
            id,
            nombre: self.nombre,
            apellido: self.apellido,
            peso: self.peso,
            talla: self.talla,
            diagnostico: self.diagnostico,
            fecha_registro,
        })
    }
}

#[async_trait]
impl PatientStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn insert(&self, patient: NewPatient) -> StorageResult<PatientRecord> {
        let conn = self.get_connection()?;

        // Text timestamps sort correctly only with a fixed fractional width.
        let now = Utc::now().trunc_subsecs(6);
        let fecha_registro = now.to_rfc3339_opts(SecondsFormat::Micros, true);

        let raw = conn
            .query_row(
                &format!(
                    "INSERT INTO pacientes (nombre, apellido, peso, talla, diagnostico, fecha_registro)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     RETURNING {SELECT_COLUMNS}"
                ),
                params![
                    patient.nombre,
                    patient.apellido,
                    patient.peso,
                    patient.talla,
                    patient.diagnostico,
                    fecha_registro
                ],
                RawRow::from_row,
            )
            .map_err(|e| internal_error(format!("Failed to insert patient: {}", e)))?;

        let record = raw.into_record()?;
        tracing::debug!(id = %record.id, "Inserted patient");
        Ok(record)
    }

    async fn list_all(&self) -> StorageResult<Vec<PatientRecord>> {
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM pacientes
                 ORDER BY fecha_registro DESC, id DESC"
            ))
            .map_err(|e| internal_error(format!("Failed to prepare list query: {}", e)))?;

        let rows = stmt
            .query_map([], RawRow::from_row)
            .map_err(|e| internal_error(format!("Failed to list patients: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;
            records.push(raw.into_record()?);
        }
        Ok(records)
    }

    async fn get_by_id(&self, id: PatientId) -> StorageResult<Option<PatientRecord>> {
        let conn = self.get_connection()?;

        let raw = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM pacientes WHERE id = ?1"),
                params![id.get()],
                RawRow::from_row,
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read patient: {}", e)))?;

        raw.map(RawRow::into_record).transpose()
    }

    async fn delete_by_id(&self, id: PatientId) -> StorageResult<PatientRecord> {
        let conn = self.get_connection()?;

        let existing = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM pacientes WHERE id = ?1"),
                params![id.get()],
                RawRow::from_row,
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read patient: {}", e)))?
            .ok_or(StorageError::Resource(ResourceError::NotFound { id }))?;

        let affected = conn
            .execute("DELETE FROM pacientes WHERE id = ?1", params![id.get()])
            .map_err(|e| internal_error(format!("Failed to delete patient: {}", e)))?;

        // A concurrent delete may have won between the check and the delete.
        if affected == 0 {
            return Err(StorageError::Resource(ResourceError::NotFound { id }));
        }

        tracing::debug!(%id, "Deleted patient");
        existing.into_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    fn sample_patient(nombre: &str) -> NewPatient {
        NewPatient {
            nombre: nombre.to_string(),
            apellido: "Lopez".to_string(),
            peso: 65.5,
            talla: 1.62,
            diagnostico: "Routine checkup".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let backend = create_test_backend();
        let before = Utc::now().trunc_subsecs(6);

        let record = backend.insert(sample_patient("Ana")).await.unwrap();

        assert_eq!(record.id.get(), 1);
        assert_eq!(record.nombre, "Ana");
        assert_eq!(record.peso, 65.5);
        assert_eq!(record.talla, 1.62);
        assert!(record.fecha_registro >= before);
    }

    #[tokio::test]
    async fn test_get_by_id_round_trips_stored_record() {
        let backend = create_test_backend();
        let created = backend.insert(sample_patient("Ana")).await.unwrap();

        let fetched = backend.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let backend = create_test_backend();
        let id = PatientId::new(42).unwrap();
        assert!(backend.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let backend = create_test_backend();
        let first = backend.insert(sample_patient("Ana")).await.unwrap();
        let second = backend.insert(sample_patient("Luis")).await.unwrap();

        let records = backend.list_all().await.unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![second.id.get(), first.id.get()]);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let backend = create_test_backend();
        let created = backend.insert(sample_patient("Ana")).await.unwrap();

        let deleted = backend.delete_by_id(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(backend.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let backend = create_test_backend();
        let id = PatientId::new(7).unwrap();

        let result = backend.delete_by_id(id).await;
        assert!(matches!(
            result,
            Err(StorageError::Resource(ResourceError::NotFound { id: missing })) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let backend = create_test_backend();
        let first = backend.insert(sample_patient("Ana")).await.unwrap();
        backend.delete_by_id(first.id).await.unwrap();

        let second = backend.insert(sample_patient("Luis")).await.unwrap();
        assert!(second.id.get() > first.id.get());
    }
}
