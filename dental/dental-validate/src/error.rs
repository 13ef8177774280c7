//! Error types for validation configuration.

/// Errors that can occur when configuring validation.
///
/// Running a validation never fails; problems with the arch are returned
/// in the [`ValidationReport`](crate::ValidationReport).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ValidateError {
    /// A parameter is out of range.
    #[error("invalid validation parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Result type for validation configuration.
pub type ValidateResult<T> = Result<T, ValidateError>;
