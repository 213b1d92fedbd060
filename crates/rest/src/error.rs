//! Error types for the patient registry API.
//!
//! Every error is rendered as the failure envelope
//! `{"success": false, "message": ..., "errors": [...]}`.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Message |
//! |-------|-------------|---------|
//! | Validation | 400 | validation error (plus itemized `errors`) |
//! | BadRequest | 400 | the specific problem |
//! | NotFound | 404 | patient not found |
//! | RouteNotFound | 404 | route not found |
//! | PayloadTooLarge | 413 | request body too large |
//! | ServiceUnavailable | 503 | the health check failure |
//! | InternalError | 500 | internal server error |
//!
//! Storage errors from the persistence layer convert automatically: a missing
//! record becomes `NotFound`, a rejected record becomes `Validation`, and
//! every backend failure becomes `InternalError`, whose detail is logged but
//! never returned to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pacientes_persistence::error::{ResourceError, StorageError, ValidationError};
use pacientes_persistence::types::PatientId;
use thiserror::Error;

use crate::responses::Envelope;

/// Client-facing message for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The payload failed field validation (HTTP 400).
    #[error("validation error: {}", .errors.join("; "))]
    Validation {
        /// One message per failing field.
        errors: Vec<String>,
    },

    /// Malformed request: bad id, unparsable body (HTTP 400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// No patient with this id (HTTP 404).
    #[error("patient not found: {id}")]
    NotFound {
        /// The requested id.
        id: PatientId,
    },

    /// No route matches the method and path (HTTP 404).
    #[error("route not found")]
    RouteNotFound,

    /// The request body exceeds the configured limit (HTTP 413).
    #[error("request body too large")]
    PayloadTooLarge,

    /// A dependency is unreachable (HTTP 503).
    #[error("service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("internal error: {message}")]
    InternalError {
        /// Detail for the log; the response carries a generic message.
        message: String,
    },
}

/// Result type for REST handlers.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation { .. } | RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } | RestError::RouteNotFound => StatusCode::NOT_FOUND,
            RestError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            RestError::Validation { .. } => "validation error".to_string(),
            RestError::BadRequest { message } => message.clone(),
            RestError::NotFound { .. } => "patient not found".to_string(),
            RestError::RouteNotFound => "route not found".to_string(),
            RestError::PayloadTooLarge => "request body too large".to_string(),
            RestError::ServiceUnavailable { message } => message.clone(),
            RestError::InternalError { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            RestError::InternalError { message } => {
                tracing::error!(error = %message, "Request failed with internal error");
            }
            RestError::ServiceUnavailable { message } => {
                tracing::warn!(error = %message, "Service unavailable");
            }
            _ => {
                tracing::debug!(status = %status, error = %self, "Request rejected");
            }
        }

        let envelope = match self {
            RestError::Validation { errors } => {
                Envelope::failure("validation error").with_errors(errors)
            }
            other => Envelope::failure(other.client_message()),
        };

        (status, Json(envelope)).into_response()
    }
}

// Implement conversions from storage errors
impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(ResourceError::NotFound { id }) => RestError::NotFound { id },
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::Validation {
            errors: err.messages(),
        }
    }
}
