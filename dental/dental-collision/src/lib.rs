//! Oriented-box collision detection for teeth in a virtual arch.
//!
//! - [`Obb`] - World-space oriented box built from a tooth's local bounds
//! - [`test_intersection`] - Separating Axis Theorem over 15 candidate axes
//! - [`SpatialHash`] - Uniform grid broad phase (20mm cells by default)
//! - [`detect_all_collisions`] - Broad phase plus SAT over a slice of [`Collidable`]s
//!
//! Detection never fails: a node without geometry becomes a near-zero box,
//! and only explicit [`SpatialHash::try_new`] construction can report a
//! [`CollisionError`].
//!
//! # Example
//!
//! ```
//! use dental_collision::{PosedTooth, detect_all_collisions};
//! use dental_types::{ToothId, ToothNode, Point3, Vector3};
//!
//! let half = Vector3::new(2.85, 5.0, 3.0);
//! let left: ToothId = "central_L".parse().unwrap();
//! let right = left.counterpart();
//!
//! let a = ToothNode::box_shaped(left, Point3::new(3.0, 0.0, 0.0), half);
//! let b = ToothNode::box_shaped(right, Point3::new(-2.0, 0.0, 0.0), half);
//!
//! let teeth = [PosedTooth::new(&a, None), PosedTooth::new(&b, None)];
//! let collisions = detect_all_collisions(&teeth);
//! assert_eq!(collisions.len(), 1);
//! assert!((collisions[0].result.penetration_depth - 0.7).abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod detect;
mod error;
mod obb;
mod sat;
mod spatial_hash;

pub use detect::{
    BroadPhaseParams, Collidable, CollisionPair, PosedTooth, detect_all_collisions,
    detect_all_collisions_with, separation_distance,
};
pub use error::CollisionError;
pub use obb::{DEGENERATE_HALF_EXTENT, Obb};
pub use sat::{CollisionResult, PARALLEL_AXIS_EPSILON, test_intersection};
pub use spatial_hash::{CellCoord, DEFAULT_CELL_SIZE, SpatialHash};
