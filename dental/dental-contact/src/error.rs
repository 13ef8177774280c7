//! Error types for contact configuration.

use thiserror::Error;

/// Errors that can occur when configuring contact analysis.
///
/// Estimation and validation never fail; a bad configuration is the only
/// error case.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContactError {
    /// A parameter is out of range.
    #[error("invalid contact parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Result type for contact operations.
pub type ContactResult<T> = Result<T, ContactError>;
