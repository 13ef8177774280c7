//! Error types for registration operations.

use thiserror::Error;

/// Errors reported by the full rigid solver.
///
/// The interactive alignment entry points never return these; they fall
/// back to the identity transform instead.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Not enough complete correspondences.
    #[error("at least {required} correspondences required, got {provided}")]
    InsufficientCorrespondences {
        /// Number of correspondences required.
        required: usize,
        /// Number of correspondences provided.
        provided: usize,
    },

    /// Source and target point sets differ in length.
    #[error("point sets must have equal length: {source_len} vs {target_len}")]
    MismatchedLengths {
        /// Number of source points.
        source_len: usize,
        /// Number of target points.
        target_len: usize,
    },

    /// Photo targets were given without a view projector.
    #[error("photo correspondences require a view projector")]
    ProjectorUnavailable,

    /// SVD computation failed during transform estimation.
    #[error("SVD computation failed during transform estimation")]
    SvdFailed,
}

/// Result type for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;
