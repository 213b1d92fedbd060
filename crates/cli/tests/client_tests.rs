//! ApiClient tests against a live registry server.
//!
//! Each test binds the REST app to an ephemeral port over a fresh in-memory
//! SQLite database and talks to it over real HTTP.

use std::sync::Arc;

use pacientes_cli::{ApiClient, ApiError};
use pacientes_persistence::backends::sqlite::SqliteBackend;
use pacientes_persistence::types::PatientId;
use pacientes_rest::{ServerConfig, create_app_with_shared};
use serde_json::{Value, json};

async fn spawn_server() -> ApiClient {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let app = create_app_with_shared(Arc::new(backend), ServerConfig::for_testing());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    ApiClient::new(format!("http://{}", addr)).expect("Failed to build client")
}

fn payload(nombre: &str) -> Value {
    json!({
        "nombre": nombre,
        "apellido": "Lopez",
        "peso": "60",
        "talla": "1.65",
        "diagnostico": "Routine checkup"
    })
}

#[tokio::test]
async fn test_register_and_show() {
    let client = spawn_server().await;

    let created = client.register(&payload("Ana")).await.unwrap();
    assert_eq!(created.nombre, "Ana");
    assert_eq!(created.peso, 60.0);
    assert_eq!(created.talla, 1.65);

    let fetched = client.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_newest_first() {
    let client = spawn_server().await;

    let first = client.register(&payload("Ana")).await.unwrap();
    let second = client.register(&payload("Luis")).await.unwrap();

    let records = client.list().await.unwrap();
    let ids: Vec<PatientId> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let client = spawn_server().await;
    let created = client.register(&payload("Ana")).await.unwrap();

    let deleted = client.delete(created.id).await.unwrap();
    assert_eq!(deleted, created);

    let err = client.get(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        ApiError::Api { message, .. } => assert_eq!(message, "patient not found"),
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(client.delete(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_server_validation_errors_are_itemized() {
    let client = spawn_server().await;

    // Bypass the client rules to reach the server validator.
    let patient = pacientes_persistence::types::NewPatient {
        nombre: "A".to_string(),
        apellido: "Lopez".to_string(),
        peso: 900.0,
        talla: 1.65,
        diagnostico: "Routine checkup".to_string(),
    };
    let err = client.create(&patient).await.unwrap_err();

    match err {
        ApiError::Validation(errors) => assert_eq!(
            errors,
            vec![
                "nombre must be at least 2 characters long",
                "peso cannot exceed 500 kg",
            ]
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_local_validation_does_not_store() {
    let client = spawn_server().await;

    let mut bad = payload("Ana");
    bad["talla"] = json!("tall");
    assert!(matches!(
        client.register(&bad).await,
        Err(ApiError::Validation(_))
    ));

    assert!(client.list().await.unwrap().is_empty());
}
