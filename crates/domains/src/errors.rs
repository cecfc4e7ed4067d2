//! # DomainError
//!
//! Centralized error handling for linkboard services.
//! Maps store and validation failures to actionable error types.

use crate::ports::StoreError;
use crate::validation::FieldError;
use thiserror::Error;

/// The primary error type for all service operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// One or more form fields were rejected; the form should be re-rendered.
    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// A conditional insert lost to an existing record.
    #[error("{entity} {key:?} already exists")]
    Duplicate { entity: &'static str, key: String },

    /// Resource not found (e.g., Submission, Comment)
    #[error("{entity} not found with key {key:?}")]
    NotFound { entity: &'static str, key: String },

    /// A required reference was absent from the input.
    #[error("missing required field {0}")]
    MissingReference(&'static str),

    /// A stored document no longer matches its model.
    #[error("corrupt {entity} record: {reason}")]
    CorruptRecord { entity: &'static str, reason: String },

    /// Infrastructure failure, not recovered locally.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized Result type for linkboard logic.
pub type Result<T> = std::result::Result<T, DomainError>;
