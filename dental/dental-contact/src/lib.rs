//! Interproximal contact analysis.
//!
//! Contacts are the points where neighbouring teeth touch. This crate
//! places them (manually or by proximity), estimates their area from the
//! tooth surfaces and checks them against clinical thresholds:
//!
//! - [`ContactManager`] - Owns contacts; automatic detection along the arch
//! - [`estimate_contact_area`] - Disc-area proxy from sampled surface vertices
//! - [`proximity_score`] / [`area_score`] - 0–1 scores around ideal values
//! - [`validate_contact`] - Errors for area and force, warnings for proximity
//!
//! Estimation and validation never fail. Threshold violations are returned
//! as diagnostics in [`ContactValidationResult`] and nothing is corrected.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod contact;
mod error;
mod estimate;
mod params;
mod validation;

pub use contact::{ContactManager, ContactOrigin, ContactPoint};
pub use error::{ContactError, ContactResult};
pub use estimate::{AreaEstimate, area_score, estimate_contact_area, proximity_score, sample_contact_area};
pub use params::ContactParams;
pub use validation::{ContactValidationResult, LOW_PROXIMITY_SCORE, validate_contact};
