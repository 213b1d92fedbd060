//! Application state for the patient registry API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend (and the connection pool behind it)
//! and the server configuration.

use std::sync::Arc;

use pacientes_persistence::core::{Backend, PatientStorage};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// The backend is acquired once at startup and shared by every request;
/// cloning the state only clones the `Arc`s.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`PatientStorage`] and [`Backend`])
///
/// # Example
///
/// ```rust,ignore
/// use pacientes_rest::{AppState, ServerConfig};
/// use pacientes_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig::default();
/// let state = AppState::new(Arc::new(backend), config);
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: PatientStorage + Backend> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pacientes_persistence::core::BackendKind;
    use pacientes_persistence::error::{BackendError, StorageResult};
    use pacientes_persistence::types::{NewPatient, PatientId, PatientRecord};

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl PatientStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn insert(&self, _patient: NewPatient) -> StorageResult<PatientRecord> {
            unimplemented!()
        }

        async fn list_all(&self) -> StorageResult<Vec<PatientRecord>> {
            Ok(Vec::new())
        }

        async fn get_by_id(&self, _id: PatientId) -> StorageResult<Option<PatientRecord>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _id: PatientId) -> StorageResult<PatientRecord> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl Backend for MockStorage {
        fn kind(&self) -> BackendKind {
            BackendKind::Sqlite
        }

        fn name(&self) -> &'static str {
            "mock"
        }

        async fn health_check(&self) -> Result<(), BackendError> {
            Ok(())
        }

        async fn close(&self) {}
    }

    #[test]
    fn test_app_state_creation() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.config().port, 3001);
    }

    #[test]
    fn test_app_state_clone_shares_storage() {
        let storage = Arc::new(MockStorage);
        let state = AppState::new(Arc::clone(&storage), ServerConfig::for_testing());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.storage_arc(), &cloned.storage_arc()));
        assert_eq!(Arc::strong_count(&storage), 3);
        assert_eq!(state.config().port, cloned.config().port);
    }
}
