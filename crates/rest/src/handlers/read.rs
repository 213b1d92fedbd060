//! Read handler: `GET /api/pacientes/{id}`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use pacientes_persistence::core::{Backend, PatientStorage};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::PatientIdPath;
use crate::responses::Envelope;
use crate::state::AppState;

/// Handler for reading one patient.
///
/// # HTTP Request
///
/// `GET /api/pacientes/{id}`
///
/// # Response
///
/// - `200 OK` - `{success, data}`
/// - `400 Bad Request` - The id is not a positive integer
/// - `404 Not Found` - No patient with this id
/// - `500 Internal Server Error` - Storage failure
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    PatientIdPath(id): PatientIdPath,
) -> RestResult<Response>
where
    S: PatientStorage + Backend + Send + Sync,
{
    debug!(%id, "Processing read request");

    let record = state
        .storage()
        .get_by_id(id)
        .await?
        .ok_or(RestError::NotFound { id })?;

    Ok(Json(Envelope::success(record)).into_response())
}
