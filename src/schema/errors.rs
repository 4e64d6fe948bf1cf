//! Payload validation errors

use thiserror::Error;

/// Result type for payload validation.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors produced while validating a request payload. All of them map
/// to a 400 response at the HTTP boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("'{0}' is a required property")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field '{field}' is not a valid date: {value:?} (expected YYYY-MM-DD)")]
    MalformedDate {
        field: &'static str,
        value: String,
    },

    #[error("field '{field}' must not be negative")]
    NegativeNumber { field: &'static str },

    #[error("request body must be a JSON object")]
    NotAnObject,
}
