//! List handler: `GET /api/pacientes`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use pacientes_persistence::core::{Backend, PatientStorage};
use tracing::debug;

use crate::error::RestResult;
use crate::responses::Envelope;
use crate::state::AppState;

/// Handler for listing every patient.
///
/// # HTTP Request
///
/// `GET /api/pacientes`
///
/// # Response
///
/// - `200 OK` - `{success, data, total}`, newest registration first
/// - `500 Internal Server Error` - Storage failure
pub async fn list_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: PatientStorage + Backend + Send + Sync,
{
    debug!("Processing list request");

    let records = state.storage().list_all().await?;
    let total = records.len();

    debug!(total, "Returning patient list");
    Ok(Json(Envelope::success(records).with_total(total)).into_response())
}
