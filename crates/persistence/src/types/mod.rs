//! Core types for the persistence layer.
//!
//! - [`PatientRecord`] - A stored patient row
//! - [`NewPatient`] - A validated payload awaiting insertion
//! - [`PatientId`] - The store-assigned identifier
//!
//! # Examples
//!
//! ```
//! use pacientes_persistence::types::{PatientId, PatientRecord};
//!
//! let record = PatientRecord {
//!     id: PatientId::new(1).unwrap(),
//!     nombre: "Ana".to_string(),
//!     apellido: "Lopez".to_string(),
//!     peso: 60.0,
//!     talla: 1.65,
//!     diagnostico: "Routine checkup".to_string(),
//!     fecha_registro: chrono::Utc::now(),
//! };
//! assert_eq!(record.full_name(), "Ana Lopez");
//! ```

mod patient;

pub use patient::{NewPatient, ParsePatientIdError, PatientId, PatientRecord};
