//! Error types for tooth model parsing.

use thiserror::Error;

/// Errors produced while building tooth model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypesError {
    /// A string could not be parsed as a tooth identifier.
    #[error("invalid tooth identifier '{0}' (expected e.g. 'central_L', 'canine_R' or an FDI number 11-13/21-23)")]
    InvalidToothId(String),
}

/// Result type for tooth model operations.
pub type TypesResult<T> = Result<T, TypesError>;
