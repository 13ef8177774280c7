//! Clinical constraint validation for a virtual anterior arch.
//!
//! [`Validator::validate`] checks a caller-owned snapshot of teeth, their
//! editing states and facial landmarks, and returns a [`ValidationReport`]:
//!
//! - **Collisions**: oriented-box intersection between any two teeth
//! - **Symmetry**: left/right distance from the midline, height and vertical scale
//! - **Arch integrity**: canine-to-canine width and gaps between neighbours
//! - **Proportions**: golden-ratio width advisories (warnings only)
//!
//! Missing teeth or landmarks fail the affected check with a diagnostic;
//! nothing here returns an error or panics on incomplete input.
//!
//! [`snap_apart`] and [`mirror_to_counterpart`] apply corrective edits to
//! tooth states, respecting locks.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use dental_types::{ARCH_SEQUENCE, Landmarks, Point3, ToothNode, Vector3};
//! use dental_validate::Validator;
//!
//! let half = Vector3::new(2.85, 5.0, 3.0);
//! let teeth: BTreeMap<_, _> = ARCH_SEQUENCE
//!     .iter()
//!     .zip([-15.0, -9.0, -3.0, 3.0, 9.0, 15.0])
//!     .map(|(id, x)| (*id, ToothNode::box_shaped(*id, Point3::new(x, 0.0, 0.0), half)))
//!     .collect();
//! let landmarks = Landmarks::new().with(Landmarks::MIDLINE, Point3::origin());
//!
//! let report = Validator::default().validate(&teeth, &BTreeMap::new(), &landmarks);
//! assert!(report.passed);
//! assert_eq!(report.summary(), "Validation passed");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod params;
mod report;
mod snap;
mod validator;

pub use error::{ValidateError, ValidateResult};
pub use params::{GOLDEN_RATIO, ValidationParams};
pub use report::{
    SUMMARY_MAX_ARCH_ERRORS, SUMMARY_MAX_COLLISIONS, SUMMARY_MAX_SYMMETRY_ERRORS, ValidationReport,
};
pub use snap::{mirror_to_counterpart, snap_apart};
pub use validator::Validator;
