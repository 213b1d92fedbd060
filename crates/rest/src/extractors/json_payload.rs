//! Untyped JSON body extractor.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};

use crate::error::RestError;

/// Axum extractor for a JSON request body.
///
/// The body is kept as a [`Value`] so that field validation can report every
/// problem at once instead of failing on the first type mismatch. An empty
/// body reads as `{}`. The `Content-Type` header is not checked.
#[derive(Debug)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RestError::PayloadTooLarge
            } else {
                RestError::BadRequest {
                    message: format!("request body could not be read: {}", e.body_text()),
                }
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonPayload(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(JsonPayload)
            .map_err(|e| RestError::BadRequest {
                message: format!("malformed JSON body: {}", e),
            })
    }
}
