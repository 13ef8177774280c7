//! Contact area and scoring heuristics.
//!
//! The area estimate is a coarse proxy. Each surface is sampled near the
//! contact point; the overlap radius is the mean sample spread minus half the
//! distance between the two sample centroids, and the area is the disc of
//! that radius. It is not an exact surface-intersection area.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::PI;

use dental_types::{MeshSurface, Point3, centroid};

use crate::ContactParams;

/// Details of one area estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaEstimate {
    /// Estimated contact area (mm²).
    pub area: f64,
    /// Overlap radius after flooring at `min_radius`.
    pub radius: f64,
    /// Samples taken from the first surface.
    pub first_samples: usize,
    /// Samples taken from the second surface.
    pub second_samples: usize,
}

impl AreaEstimate {
    /// True when either surface had no samples near the contact.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.first_samples == 0 || self.second_samples == 0
    }
}

/// Mean distance from the centroid to each point.
fn mean_spread(points: &[Point3<f64>], center: &Point3<f64>) -> f64 {
    points.iter().map(|p| (p - center).norm()).sum::<f64>() / points.len() as f64
}

/// Samples both surfaces around `at` and estimates the contact disc.
#[must_use]
pub fn sample_contact_area<A, B>(
    at: &Point3<f64>,
    first: &A,
    second: &B,
    params: &ContactParams,
) -> AreaEstimate
where
    A: MeshSurface + ?Sized,
    B: MeshSurface + ?Sized,
{
    let samples_a = first.points_within(at, params.search_radius);
    let samples_b = second.points_within(at, params.search_radius);
    let min_radius = params.min_radius.max(0.0);

    let radius = match (centroid(&samples_a), centroid(&samples_b)) {
        (Some(ca), Some(cb)) => {
            let spread = f64::midpoint(mean_spread(&samples_a, &ca), mean_spread(&samples_b, &cb));
            let half_gap = (cb - ca).norm() / 2.0;
            (spread - half_gap).max(0.0).max(min_radius)
        }
        _ => min_radius,
    };

    AreaEstimate {
        area: PI * radius * radius,
        radius,
        first_samples: samples_a.len(),
        second_samples: samples_b.len(),
    }
}

/// Estimated contact area (mm²) at `at` between two surfaces.
///
/// Never negative or NaN for finite input. When either surface has no
/// vertices within `search_radius`, the area of a `min_radius` disc is
/// returned.
///
/// # Example
///
/// ```
/// use dental_contact::{ContactParams, estimate_contact_area};
/// use nalgebra::Point3;
///
/// let params = ContactParams::default();
/// let empty: Vec<Point3<f64>> = Vec::new();
/// let some = vec![Point3::new(0.1, 0.0, 0.0)];
///
/// let area = estimate_contact_area(&Point3::origin(), &empty, &some, &params);
/// assert!((area - std::f64::consts::PI * 0.01).abs() < 1e-12);
/// ```
#[must_use]
pub fn estimate_contact_area<A, B>(
    at: &Point3<f64>,
    first: &A,
    second: &B,
    params: &ContactParams,
) -> f64
where
    A: MeshSurface + ?Sized,
    B: MeshSurface + ?Sized,
{
    sample_contact_area(at, first, second, params).area
}

/// Linear falloff from 1.0 at `ideal` to 0.0 at a full `range` away.
fn linear_score(value: f64, ideal: f64, range: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if range <= 0.0 {
        return if (value - ideal).abs() <= f64::EPSILON { 1.0 } else { 0.0 };
    }
    (1.0 - (value - ideal).abs() / range).clamp(0.0, 1.0)
}

/// 0–1 score for an interproximal distance, peaking at `ideal_distance`.
///
/// `1 - |distance - ideal| / (max_distance - min_distance)`, clamped.
#[must_use]
pub fn proximity_score(distance: f64, params: &ContactParams) -> f64 {
    linear_score(
        distance,
        params.ideal_distance,
        params.max_distance - params.min_distance,
    )
}

/// 0–1 score for a contact area, peaking at `ideal_contact_area`.
#[must_use]
pub fn area_score(area: f64, params: &ContactParams) -> f64 {
    linear_score(
        area,
        params.ideal_contact_area,
        params.max_contact_area - params.min_contact_area,
    )
}
