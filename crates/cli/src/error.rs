//! Client-side error types.

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::client::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload was rejected field by field, either locally before
    /// sending or by the server.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The server answered with a failure envelope.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The envelope's `message`.
        message: String,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Returns the HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Validation(_) | ApiError::Transport(_) => None,
        }
    }

    /// True when the server reported that the record does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = ApiError::Validation(vec![
            "nombre is required".to_string(),
            "peso must be a number".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: nombre is required, peso must be a number"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_api_status() {
        let err = ApiError::Api {
            status: 404,
            message: "patient not found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "server returned 404: patient not found");
    }
}
