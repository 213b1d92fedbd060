//! # pacientes-cli - Patient Registry Terminal Client
//!
//! A terminal front end for the patient registry API: register patients,
//! list the registry, inspect one record, and delete records after
//! confirmation.
//!
//! Payloads are checked locally with
//! [`ValidationRules::CLIENT`](pacientes_persistence::validation::ValidationRules::CLIENT)
//! before anything is sent; the server re-validates with its own rules.
//!
//! - [`client`] - HTTP client and envelope decoding
//! - [`error`] - Client error type
//! - [`render`] - Table and record formatting, confirmation prompt

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod render;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult};
