//! Core storage traits and abstractions.
//!
//! - [`Backend`] - Connection pool lifecycle (health check, close)
//! - [`PatientStorage`] - The patient record gateway (insert, list, get, delete)
//!
//! Both backends in [`crate::backends`] implement both traits, so handlers
//! can be written against `S: PatientStorage + Backend`.

mod backend;
mod storage;

pub use backend::{Backend, BackendKind};
pub use storage::PatientStorage;
