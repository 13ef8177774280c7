//! Error types for collision operations.

/// Errors that can occur when configuring collision detection.
///
/// Detection itself is total; only explicit construction of a
/// [`SpatialHash`](crate::SpatialHash) can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CollisionError {
    /// The spatial hash cell size must be positive and finite.
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
}

