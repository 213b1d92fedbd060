//! Patient record types.
//!
//! This module defines the [`PatientRecord`] stored in the `pacientes` table,
//! the validated [`NewPatient`] payload that precedes it, and the
//! [`PatientId`] that identifies it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a stored patient record.
///
/// Always a positive integer assigned by the store.
///
/// # Examples
///
/// ```
/// use pacientes_persistence::types::PatientId;
///
/// let id: PatientId = "17".parse().unwrap();
/// assert_eq!(id.get(), 17);
///
/// assert!("abc".parse::<PatientId>().is_err());
/// assert!("0".parse::<PatientId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PatientId(i64);

impl PatientId {
    /// Creates an id, returning `None` unless `value` is positive.
    pub fn new(value: i64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid [`PatientId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePatientIdError {
    /// The input is not an integer.
    #[error("id must be an integer: '{0}'")]
    NotAnInteger(String),
    /// The input is an integer but not a positive one.
    #[error("id must be a positive integer: {0}")]
    NotPositive(i64),
}

impl FromStr for PatientId {
    type Err = ParsePatientIdError;

    /// Accepts plain decimal digits, optionally preceded by `-` so that
    /// negative ids are reported as not positive. No sign `+`, no whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePatientIdError::NotAnInteger(s.to_string()));
        }
        let value: i64 = s
            .parse()
            .map_err(|_| ParsePatientIdError::NotAnInteger(s.to_string()))?;
        PatientId::new(value).ok_or(ParsePatientIdError::NotPositive(value))
    }
}

impl TryFrom<i64> for PatientId {
    type Error = ParsePatientIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        PatientId::new(value).ok_or(ParsePatientIdError::NotPositive(value))
    }
}

impl From<PatientId> for i64 {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

/// A validated, normalized patient payload that has not been stored yet.
///
/// Produced by [`validate_patient`](crate::validation::validate_patient);
/// string fields are already trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    /// First name.
    pub nombre: String,
    /// Surname.
    pub apellido: String,
    /// Weight in kilograms.
    pub peso: f64,
    /// Height in metres.
    pub talla: f64,
    /// Diagnosis text.
    pub diagnostico: String,
}

/// A patient row as stored in the `pacientes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Store-assigned identifier.
    pub id: PatientId,
    /// First name.
    pub nombre: String,
    /// Surname.
    pub apellido: String,
    /// Weight in kilograms.
    pub peso: f64,
    /// Height in metres.
    pub talla: f64,
    /// Diagnosis text.
    pub diagnostico: String,
    /// When the record was inserted (server clock).
    pub fecha_registro: DateTime<Utc>,
}

impl PatientRecord {
    /// Returns "nombre apellido".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}
