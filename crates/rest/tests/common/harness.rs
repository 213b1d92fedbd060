//! REST API test harness.
//!
//! Provides infrastructure for testing the REST API endpoints.

use std::sync::Arc;

use axum::Router;
use axum_test::{TestResponse, TestServer};
use pacientes_persistence::backends::sqlite::SqliteBackend;
use pacientes_persistence::core::PatientStorage;
use pacientes_persistence::types::PatientRecord;
use pacientes_persistence::validation::validate_patient;
use serde_json::Value;

use pacientes_rest::{AppState, ServerConfig, create_app_with_shared, routing, with_middleware};

use super::fixtures;

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_read() {
///     let harness = RestTestHarness::new_sqlite();
///     let seeded = harness.seed_patient("Ana", "Lopez").await;
///
///     let response = harness.get(&format!("/api/pacientes/{}", seeded.id)).await;
///     assert_eq!(response.status_code(), 200);
/// }
/// ```
pub struct RestTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend.
    pub backend: Arc<SqliteBackend>,

    /// Server configuration.
    pub config: ServerConfig,
}

impl RestTestHarness {
    /// Creates a harness over a fresh in-memory database.
    pub fn new_sqlite() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let backend = create_backend();
        let app = create_app_with_shared(Arc::clone(&backend), config.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            backend,
            config,
        }
    }

    /// Creates a harness whose router has extra routes merged in before the
    /// middleware stack is applied.
    pub fn with_extra_routes(extra: Router) -> Self {
        let config = ServerConfig::for_testing();
        let backend = create_backend();
        let state = AppState::new(Arc::clone(&backend), config.clone());
        let router = routing::create_routes(state).merge(extra);
        let app = with_middleware(router, &config);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            backend,
            config,
        }
    }

    /// Stores a patient directly through the backend.
    pub async fn seed_patient(&self, nombre: &str, apellido: &str) -> PatientRecord {
        let patient = validate_patient(&fixtures::payload_named(nombre, apellido))
            .expect("fixture should validate");
        self.backend
            .insert(patient)
            .await
            .expect("Failed to seed patient")
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server.get(path).await
    }

    /// Makes a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.server.post(path).json(&body).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.server.delete(path).await
    }
}

fn create_backend() -> Arc<SqliteBackend> {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    Arc::new(backend)
}
