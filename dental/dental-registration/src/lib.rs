//! Correspondence-driven alignment for dental scans and photos.
//!
//! The user clicks matching points on a scan model and on either a frontal
//! photo or a second model. This crate turns those clicks into a correction
//! transform:
//!
//! - **Centroid alignment** ([`align_point_sets`]): translation that moves
//!   the source centroid onto the target centroid. This is what the
//!   interactive aligner applies.
//! - **Photo alignment** ([`align_2d_to_3d`]): screen points are unprojected
//!   at the model's depth through a [`ViewProjector`], then aligned in 3D.
//! - **Rigid fit** ([`solve_rigid_transform`]): optional Kabsch solve with
//!   rotation and optional uniform scale.
//!
//! [`CorrespondenceSet`] tracks the pairs as they are placed and only solves
//! once at least [`MIN_CORRESPONDENCES`] are complete.
//!
//! # Example
//!
//! ```
//! use dental_registration::{CorrespondenceSet, CorrespondenceTarget};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut set = CorrespondenceSet::new();
//! let shift = Vector3::new(0.5, -1.0, 0.0);
//! for p in [
//!     Point3::new(-4.0, 0.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//!     Point3::new(0.0, 3.0, 1.0),
//! ] {
//!     set.add_pair(p, CorrespondenceTarget::Model(p + shift));
//! }
//!
//! let correction = set.solve(None);
//! assert!((correction.translation - shift).norm() < 1e-12);
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod align;
mod correspondence;
mod error;
mod kabsch;
mod projector;

pub use align::{MIN_CORRESPONDENCES, align_2d_to_3d, align_point_sets, alignment_rms};
pub use correspondence::{
    AlignmentMode, CorrespondencePair, CorrespondenceSet, CorrespondenceTarget,
};
pub use error::{RegistrationError, RegistrationResult};
pub use kabsch::solve_rigid_transform;
pub use projector::{PerspectiveProjector, ViewProjector};
