//! Delete handler: `DELETE /api/pacientes/{id}`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use pacientes_persistence::core::{Backend, PatientStorage};
use tracing::{debug, info};

use crate::error::RestResult;
use crate::extractors::PatientIdPath;
use crate::responses::Envelope;
use crate::state::AppState;

/// Handler for deleting one patient.
///
/// The response carries the record as it was before deletion.
///
/// # HTTP Request
///
/// `DELETE /api/pacientes/{id}`
///
/// # Response
///
/// - `200 OK` - `{success, message, data}`
/// - `400 Bad Request` - The id is not a positive integer
/// - `404 Not Found` - No patient with this id (including an already deleted one)
/// - `500 Internal Server Error` - Storage failure
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    PatientIdPath(id): PatientIdPath,
) -> RestResult<Response>
where
    S: PatientStorage + Backend + Send + Sync,
{
    debug!(%id, "Processing delete request");

    let deleted = state.storage().delete_by_id(id).await?;

    info!(
        id = %deleted.id,
        nombre = %deleted.nombre,
        apellido = %deleted.apellido,
        "Patient deleted"
    );

    let body = Envelope::success(deleted).with_message("patient deleted successfully");
    Ok(Json(body).into_response())
}
