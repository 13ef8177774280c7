//! Validation of individual contact points.

use dental_types::{MeshSurface, Point3};

use crate::estimate::{area_score, proximity_score, sample_contact_area};
use crate::{ContactParams, ContactPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Proximity scores below this produce a warning.
pub const LOW_PROXIMITY_SCORE: f64 = 0.5;

/// Outcome of validating one contact.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactValidationResult {
    /// True when there are no errors. Warnings do not affect this.
    pub passed: bool,
    /// Estimated contact area (mm²).
    pub area: f64,
    /// 0–1 proximity score of the surface gap.
    pub proximity_score: f64,
    /// 0–1 score of the area against the ideal.
    pub area_score: f64,
    /// Threshold violations.
    pub errors: Vec<String>,
    /// Advisory findings.
    pub warnings: Vec<String>,
}

/// Shortest distance between any sample of `a` and any sample of `b`.
fn closest_gap(a: &[Point3<f64>], b: &[Point3<f64>]) -> Option<f64> {
    a.iter()
        .flat_map(|p| b.iter().map(move |q| (p - q).norm()))
        .min_by(f64::total_cmp)
}

/// Validates one contact against its two surfaces.
///
/// The area is re-estimated from the surfaces; the surface gap is the
/// closest pair of samples within `search_radius` of the contact. Area and
/// force violations are errors; a low proximity score or missing samples
/// are warnings. Nothing is corrected.
#[must_use]
pub fn validate_contact<A, B>(
    contact: &ContactPoint,
    first: &A,
    second: &B,
    params: &ContactParams,
) -> ContactValidationResult
where
    A: MeshSurface + ?Sized,
    B: MeshSurface + ?Sized,
{
    let estimate = sample_contact_area(&contact.position, first, second, params);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if estimate.area < params.min_contact_area {
        errors.push(format!(
            "{}-{}: contact area {:.2}mm² below minimum {:.2}mm²",
            contact.first, contact.second, estimate.area, params.min_contact_area
        ));
    } else if estimate.area > params.max_contact_area {
        errors.push(format!(
            "{}-{}: contact area {:.2}mm² exceeds maximum {:.2}mm²",
            contact.first, contact.second, estimate.area, params.max_contact_area
        ));
    }

    if contact.force >= params.max_force {
        errors.push(format!(
            "{}-{}: contact force {:.1}N exceeds maximum {:.1}N",
            contact.first, contact.second, contact.force, params.max_force
        ));
    }

    let proximity = if estimate.is_degenerate() {
        warnings.push(format!(
            "{}-{}: no surface samples within {:.1}mm of contact",
            contact.first, contact.second, params.search_radius
        ));
        0.0
    } else {
        let a = first.points_within(&contact.position, params.search_radius);
        let b = second.points_within(&contact.position, params.search_radius);
        closest_gap(&a, &b).map_or(0.0, |gap| proximity_score(gap, params))
    };

    if !estimate.is_degenerate() && proximity < LOW_PROXIMITY_SCORE {
        warnings.push(format!(
            "{}-{}: low proximity score {:.2}",
            contact.first, contact.second, proximity
        ));
    }

    ContactValidationResult {
        passed: errors.is_empty(),
        area: estimate.area,
        proximity_score: proximity,
        area_score: area_score(estimate.area, params),
        errors,
        warnings,
    }
}
