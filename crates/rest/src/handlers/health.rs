//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pacientes_persistence::core::{Backend, PatientStorage};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Round-trips a trivial query through the connection pool.
///
/// # HTTP Request
///
/// `GET /api/health`
///
/// # Response
///
/// - `200 OK` - `{success, status: "healthy", backend, timestamp}`
/// - `503 Service Unavailable` - The database cannot be reached
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: PatientStorage + Backend + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.storage().name();

    if let Err(e) = state.storage().health_check().await {
        tracing::warn!(backend = backend_name, error = %e, "Health check failed");
        return Err(RestError::ServiceUnavailable {
            message: "database unavailable".to_string(),
        });
    }

    let health_response = serde_json::json!({
        "success": true,
        "status": "healthy",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}
