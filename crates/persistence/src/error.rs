//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates record validation failures, missing
//! records, and backend (connection/query) failures.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

use crate::types::PatientId;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No record exists with the given id.
    #[error("patient not found: {id}")]
    NotFound { id: PatientId },
}

/// Errors produced by the record validator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The payload failed one or more field constraints.
    #[error("invalid patient record: {}", join_messages(.details))]
    InvalidRecord { details: Vec<ValidationDetail> },
}

impl ValidationError {
    /// Returns the individual field failures.
    pub fn details(&self) -> &[ValidationDetail] {
        match self {
            ValidationError::InvalidRecord { details } => details,
        }
    }

    /// Returns the human-readable messages, in validation order.
    pub fn messages(&self) -> Vec<String> {
        self.details().iter().map(|d| d.message.clone()).collect()
    }
}

fn join_messages(details: &[ValidationDetail]) -> String {
    details
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// The payload key that failed.
    pub field: String,
    /// A human-readable message naming the field.
    pub message: String,
}

impl ValidationDetail {
    /// Creates a new detail for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored row could not be mapped to a record.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
