//! Core patient storage trait.
//!
//! This module defines the [`PatientStorage`] trait, the gateway between the
//! request handlers and the relational store.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{NewPatient, PatientId, PatientRecord};

/// Core storage trait for patient records.
///
/// Records are created, read and deleted; there is no update path. Every
/// operation is a single auto-committed statement (or, for delete, a lookup
/// followed by one statement) using bound parameters only.
///
/// # Example
///
/// ```ignore
/// use pacientes_persistence::core::PatientStorage;
/// use pacientes_persistence::validation::validate_patient;
///
/// async fn example<S: PatientStorage>(storage: &S) -> Result<(), Box<dyn std::error::Error>> {
///     let new = validate_patient(&serde_json::json!({
///         "nombre": "Ana",
///         "apellido": "Lopez",
///         "peso": 60,
///         "talla": 1.65,
///         "diagnostico": "Routine checkup"
///     }))?;
///
///     let stored = storage.insert(new).await?;
///     assert!(storage.get_by_id(stored.id).await?.is_some());
///
///     let deleted = storage.delete_by_id(stored.id).await?;
///     assert_eq!(deleted.id, stored.id);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts a validated patient.
    ///
    /// The store assigns the id and stamps `fecha_registro` with its own
    /// clock; nothing from the client is used for either.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - On connection failure or constraint violation
    async fn insert(&self, patient: NewPatient) -> StorageResult<PatientRecord>;

    /// Returns every record, most recently registered first.
    ///
    /// An empty table yields an empty vector.
    async fn list_all(&self) -> StorageResult<Vec<PatientRecord>>;

    /// Reads a record by id.
    ///
    /// # Returns
    ///
    /// The record if present, or `None`.
    async fn get_by_id(&self, id: PatientId) -> StorageResult<Option<PatientRecord>>;

    /// Deletes a record by id and returns it as it was before deletion.
    ///
    /// Existence is checked before deleting so that "nothing to delete" is
    /// reported distinctly from a backend failure.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no record has this id
    /// * `StorageError::Backend` - On connection or query failure
    async fn delete_by_id(&self, id: PatientId) -> StorageResult<PatientRecord>;
}
