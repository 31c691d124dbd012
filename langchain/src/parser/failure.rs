//! Why a model response failed to parse.

use thiserror::Error;

/// Cause carried by `RunnableError::Parse`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseFailure {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Decoded JSON was not an object; carries the JSON type found.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}`: expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}`: {value:?} is not one of {allowed:?}")]
    NotInEnum {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("field `{field}`: {value} violates {constraint}")]
    OutOfRange {
        field: String,
        value: f64,
        constraint: String,
    },
}
