//! HTTP client for the patient registry API.
//!
//! [`ApiClient`] wraps the four `/api/pacientes` endpoints and unwraps the
//! response envelope: a success yields the `data` member, a failure becomes
//! an [`ApiError`].

use std::time::Duration;

use pacientes_persistence::types::{NewPatient, PatientId, PatientRecord};
use pacientes_persistence::validation::ValidationRules;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The response body shape shared by every endpoint.
#[derive(Debug, Deserialize)]
struct ResponseEnvelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
    errors: Option<Vec<String>>,
}

/// Client for the patient registry API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Validates `payload` with the client rules, then registers it.
    ///
    /// Local validation failures are returned without contacting the server.
    pub async fn register(&self, payload: &Value) -> ApiResult<PatientRecord> {
        let patient = ValidationRules::CLIENT
            .validate(payload)
            .map_err(|e| ApiError::Validation(e.messages()))?;
        self.create(&patient).await
    }

    /// POSTs an already validated patient.
    pub async fn create(&self, patient: &NewPatient) -> ApiResult<PatientRecord> {
        debug!(nombre = %patient.nombre, "Registering patient");
        let response = self
            .http
            .post(self.url("/pacientes"))
            .json(patient)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches every record, newest first.
    pub async fn list(&self) -> ApiResult<Vec<PatientRecord>> {
        let response = self.http.get(self.url("/pacientes")).send().await?;
        decode(response).await
    }

    /// Fetches one record.
    pub async fn get(&self, id: PatientId) -> ApiResult<PatientRecord> {
        let response = self
            .http
            .get(self.url(&format!("/pacientes/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    /// Deletes one record and returns it.
    pub async fn delete(&self, id: PatientId) -> ApiResult<PatientRecord> {
        debug!(id = %id, "Deleting patient");
        let response = self
            .http
            .delete(self.url(&format!("/pacientes/{}", id)))
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    let envelope: ResponseEnvelope<T> =
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Api {
            status: status.as_u16(),
            message: format!("unexpected response body: {}", e),
        })?;

    if status.is_success() && envelope.success {
        return envelope.data.ok_or_else(|| ApiError::Api {
            status: status.as_u16(),
            message: "response carried no data".to_string(),
        });
    }

    match envelope.errors {
        Some(errors) if !errors.is_empty() => Err(ApiError::Validation(errors)),
        _ => Err(ApiError::Api {
            status: status.as_u16(),
            message: envelope.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            }),
        }),
    }
}
