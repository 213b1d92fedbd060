//! Axum extractors for the patient registry API.
//!
//! - [`PatientIdPath`] - Parse the `{id}` path segment into a [`PatientId`](pacientes_persistence::types::PatientId)
//! - [`JsonPayload`] - Read the request body as untyped JSON for the validator
//!
//! Both reject with [`RestError`](crate::error::RestError), so failures use the
//! same envelope as every other error.

mod json_payload;
mod patient_id;

pub use json_payload::JsonPayload;
pub use patient_id::PatientIdPath;
