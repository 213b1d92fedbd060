//! Patient Registry Persistence Layer
//!
//! This crate owns the patient record model, the field validator shared by the
//! server and the command-line client, and the storage backends that keep
//! records in the `pacientes` table.
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pacientes-persistence = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL, the production store
//!
//! Disabling default features leaves only the types and the validator, which
//! is what the client uses.
//!
//! # Architecture
//!
//! - [`types`] - Patient ids, new patient payloads and stored records
//! - [`validation`] - Field rules for incoming payloads
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and abstractions
//! - [`backends`] - Backend implementations (SQLite, PostgreSQL)
//!
//! # Quick Start
//!
//! ```
//! use pacientes_persistence::validation::validate_patient;
//! use serde_json::json;
//!
//! let patient = validate_patient(&json!({
//!     "nombre": "  Ana ",
//!     "apellido": "Lopez",
//!     "peso": 65.5,
//!     "talla": "1.62",
//!     "diagnostico": "Routine checkup"
//! }))
//! .unwrap();
//!
//! assert_eq!(patient.nombre, "Ana");
//! assert_eq!(patient.talla, 1.62);
//!
//! let err = validate_patient(&json!({"nombre": "A"})).unwrap_err();
//! assert!(err.messages().contains(&"nombre must be at least 2 characters long".to_string()));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{NewPatient, PatientId, PatientRecord};
pub use validation::{ValidationRules, validate_patient};

// Re-export core traits
pub use core::{Backend, BackendKind, PatientStorage};
