//! Separating Axis Theorem test between two oriented boxes.
//!
//! Candidate axes are the three face axes of each box and the nine cross
//! products of one box's axis with the other's. Cross products shorter than
//! [`PARALLEL_AXIS_EPSILON`] come from near-parallel edges and are skipped.

use dental_types::Vector3;

use crate::Obb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cross products shorter than this are treated as parallel edges.
pub const PARALLEL_AXIS_EPSILON: f64 = 1e-4;

/// Outcome of a box-box intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionResult {
    /// Whether the boxes overlap on every candidate axis.
    pub is_colliding: bool,
    /// Overlap along the minimum-penetration axis; zero when not colliding.
    pub penetration_depth: f64,
    /// Translation that moves the first box out of the second; zero when
    /// not colliding.
    pub correction: Vector3<f64>,
}

impl CollisionResult {
    /// A non-colliding result.
    #[must_use]
    pub fn none() -> Self {
        Self {
            is_colliding: false,
            penetration_depth: 0.0,
            correction: Vector3::zeros(),
        }
    }
}

impl Default for CollisionResult {
    fn default() -> Self {
        Self::none()
    }
}

/// Overlap of two boxes' corner projections on `axis`.
///
/// Non-positive values mean the axis separates the boxes.
fn axis_overlap(a: &Obb, b: &Obb, axis: &Vector3<f64>) -> f64 {
    let (a_min, a_max) = a.project(axis);
    let (b_min, b_max) = b.project(axis);
    a_max.min(b_max) - a_min.max(b_min)
}

/// Tests two oriented boxes for intersection.
///
/// Returns as soon as a separating axis is found. Boxes that only touch
/// (zero overlap) are not colliding. When colliding, the correction vector
/// has length `penetration_depth` and points so that moving `a` by it
/// increases the distance between the centres.
///
/// # Example
///
/// ```
/// use dental_collision::{Obb, test_intersection};
/// use nalgebra::{Point3, Vector3};
///
/// let a = Obb::axis_aligned(Point3::new(0.0, 0.0, 0.0), Vector3::repeat(1.0));
/// let b = Obb::axis_aligned(Point3::new(1.5, 0.0, 0.0), Vector3::repeat(1.0));
///
/// let result = test_intersection(&a, &b);
/// assert!(result.is_colliding);
/// assert!((result.penetration_depth - 0.5).abs() < 1e-12);
/// assert!(result.correction.x < 0.0);
/// ```
#[must_use]
pub fn test_intersection(a: &Obb, b: &Obb) -> CollisionResult {
    let mut min_overlap = f64::INFINITY;
    let mut best_axis = Vector3::x();

    let mut consider = |axis: Vector3<f64>| -> bool {
        let overlap = axis_overlap(a, b, &axis);
        if overlap <= 0.0 {
            return false;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
        true
    };

    // Face axes of both boxes
    for axis in a.axes.iter().chain(b.axes.iter()) {
        if !consider(*axis) {
            return CollisionResult::none();
        }
    }

    // Edge-edge cross products
    for axis_a in &a.axes {
        for axis_b in &b.axes {
            let cross = axis_a.cross(axis_b);
            let len = cross.norm();
            if len < PARALLEL_AXIS_EPSILON {
                continue;
            }
            if !consider(cross / len) {
                return CollisionResult::none();
            }
        }
    }

    // Point the correction from b towards a
    let away = a.center - b.center;
    if best_axis.dot(&away) < 0.0 {
        best_axis = -best_axis;
    }

    CollisionResult {
        is_colliding: true,
        penetration_depth: min_overlap,
        correction: best_axis * min_overlap,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dental_types::{Aabb, Point3, RigidTransform, UnitQuaternion};
    use std::f64::consts::FRAC_PI_4;

    fn unit_box(x: f64, y: f64, z: f64) -> Obb {
        Obb::axis_aligned(Point3::new(x, y, z), Vector3::repeat(1.0))
    }

    #[test]
    fn test_separated_boxes() {
        let a = unit_box(0.0, 0.0, 0.0);
        for b in [unit_box(2.1, 0.0, 0.0), unit_box(0.0, -2.1, 0.0), unit_box(0.0, 0.0, 3.0)] {
            let result = test_intersection(&a, &b);
            assert!(!result.is_colliding);
            assert_relative_eq!(result.penetration_depth, 0.0);
            assert_eq!(result.correction, Vector3::zeros());
        }
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let result = test_intersection(&unit_box(0.0, 0.0, 0.0), &unit_box(2.0, 0.0, 0.0));
        assert!(!result.is_colliding);
    }

    #[test]
    fn test_overlap_depth_and_direction() {
        let a = unit_box(0.0, 0.0, 0.0);
        let b = unit_box(0.0, 1.7, 0.0);
        let result = test_intersection(&a, &b);
        assert!(result.is_colliding);
        assert_relative_eq!(result.penetration_depth, 0.3, epsilon = 1e-12);
        assert_relative_eq!(result.correction, Vector3::new(0.0, -0.3, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_correction_separates() {
        let a = unit_box(0.4, 0.1, 0.0);
        let b = unit_box(1.2, 0.0, 0.2);
        let result = test_intersection(&a, &b);
        assert!(result.is_colliding);

        let moved = Obb {
            center: a.center + result.correction * 1.0001,
            ..a
        };
        assert!(!test_intersection(&moved, &b).is_colliding);
    }

    #[test]
    fn test_rotated_vertex_penetration() {
        // A unit box turned 45 degrees about z pokes a vertex out to x = sqrt(2).
        let pose = RigidTransform::from_rotation(UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            FRAC_PI_4,
        ));
        let bounds = Aabb::from_half_extents(Vector3::repeat(1.0));
        let diamond = Obb::from_bounds(&bounds, &pose, &Vector3::repeat(1.0));

        let result = test_intersection(&diamond, &unit_box(2.3, 0.0, 0.0));
        assert!(result.is_colliding);
        assert_relative_eq!(result.penetration_depth, 2.0_f64.sqrt() - 1.3, epsilon = 1e-9);
        assert!(result.correction.x < 0.0);

        assert!(!test_intersection(&diamond, &unit_box(2.5, 0.0, 0.0)).is_colliding);
    }

    #[test]
    fn test_parallel_axes_are_skipped() {
        // Identical orientation produces zero cross products; the face axes
        // alone decide the outcome.
        let a = unit_box(0.0, 0.0, 0.0);
        let b = unit_box(0.5, 0.5, 0.5);
        let result = test_intersection(&a, &b);
        assert!(result.is_colliding);
        assert_relative_eq!(result.penetration_depth, 1.5, epsilon = 1e-12);
        assert!(result.penetration_depth.is_finite());
    }

    #[test]
    fn test_degenerate_box_far_away() {
        let a = unit_box(0.0, 0.0, 0.0);
        let b = Obb::degenerate(Point3::new(5.0, 0.0, 0.0));
        assert!(!test_intersection(&a, &b).is_colliding);
        assert!(!test_intersection(&b, &b).correction.x.is_nan());
    }
}
