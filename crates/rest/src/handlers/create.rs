//! Create handler: `POST /api/pacientes`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pacientes_persistence::core::{Backend, PatientStorage};
use pacientes_persistence::validation::validate_patient;
use tracing::{debug, info};

use crate::error::RestResult;
use crate::extractors::JsonPayload;
use crate::responses::Envelope;
use crate::state::AppState;

/// Handler for registering a patient.
///
/// Validates every field of the body, then inserts the normalized record. The
/// store assigns `id` and `fecha_registro`.
///
/// # HTTP Request
///
/// `POST /api/pacientes`
///
/// # Response
///
/// - `201 Created` - `{success, message, data}` with the stored record
/// - `400 Bad Request` - Validation errors (itemized) or malformed JSON
/// - `500 Internal Server Error` - Storage failure
///
/// # Example
///
/// ```http
/// POST /api/pacientes HTTP/1.1
/// Content-Type: application/json
///
/// {"nombre":"Ana","apellido":"Lopez","peso":60,"talla":1.65,"diagnostico":"Routine checkup"}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    JsonPayload(payload): JsonPayload,
) -> RestResult<Response>
where
    S: PatientStorage + Backend + Send + Sync,
{
    debug!("Processing create request");

    let patient = validate_patient(&payload)?;
    let record = state.storage().insert(patient).await?;

    info!(id = %record.id, "Patient registered");

    let body = Envelope::success(record).with_message("patient registered successfully");
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
