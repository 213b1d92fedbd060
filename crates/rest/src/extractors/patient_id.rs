//! Patient id path extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use pacientes_persistence::types::{ParsePatientIdError, PatientId};

use crate::error::RestError;

/// Axum extractor for the `{id}` path segment.
///
/// Rejects anything that is not a positive integer with a 400, so a bad id
/// never reaches the store.
///
/// # Example
///
/// ```rust,ignore
/// use pacientes_rest::extractors::PatientIdPath;
///
/// async fn read_handler(PatientIdPath(id): PatientIdPath) {
///     println!("Reading patient {}", id);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PatientIdPath(pub PatientId);

impl<S> FromRequestParts<S> for PatientIdPath
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        raw.parse::<PatientId>()
            .map(PatientIdPath)
            .map_err(|e| RestError::BadRequest {
                message: match e {
                    ParsePatientIdError::NotAnInteger(_) => "id must be an integer".to_string(),
                    ParsePatientIdError::NotPositive(_) => {
                        "id must be a positive integer".to_string()
                    }
                },
            })
    }
}
