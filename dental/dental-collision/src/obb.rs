//! Oriented bounding boxes in world space.

use dental_types::{Aabb, Point3, RigidTransform, Vector3};
use nalgebra::Matrix3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-extent used for nodes that have no geometry.
pub const DEGENERATE_HALF_EXTENT: f64 = 1e-6;

/// An oriented bounding box.
///
/// The box is recomputed from the current node state whenever it is needed;
/// it is a value, not a cache.
///
/// # Example
///
/// ```
/// use dental_collision::Obb;
/// use dental_types::{Aabb, Point3, RigidTransform, Vector3};
///
/// let bounds = Aabb::from_half_extents(Vector3::new(4.0, 5.0, 3.0));
/// let pose = RigidTransform::from_translation(Vector3::new(10.0, 0.0, 0.0));
/// let obb = Obb::from_bounds(&bounds, &pose, &Vector3::new(0.5, 1.0, 1.0));
///
/// assert_eq!(obb.center, Point3::new(10.0, 0.0, 0.0));
/// assert_eq!(obb.half_extents, Vector3::new(2.0, 5.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obb {
    /// World-space centre.
    pub center: Point3<f64>,
    /// Orthonormal world-space axes (local x, y, z).
    pub axes: [Vector3<f64>; 3],
    /// Half-extents along each axis.
    pub half_extents: Vector3<f64>,
}

impl Obb {
    /// Creates a box from its parts. Half-extents are taken by absolute value.
    #[must_use]
    pub fn new(center: Point3<f64>, axes: [Vector3<f64>; 3], half_extents: Vector3<f64>) -> Self {
        Self {
            center,
            axes,
            half_extents: half_extents.abs(),
        }
    }

    /// An axis-aligned box.
    #[must_use]
    pub fn axis_aligned(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self::new(center, [Vector3::x(), Vector3::y(), Vector3::z()], half_extents)
    }

    /// A near-zero box standing in for a node without geometry.
    #[must_use]
    pub fn degenerate(center: Point3<f64>) -> Self {
        Self::axis_aligned(center, Vector3::repeat(DEGENERATE_HALF_EXTENT))
    }

    /// Builds the world box for local `bounds` placed by `transform`.
    ///
    /// `scale` is the per-axis world scale; the uniform scale carried by
    /// `transform` is ignored in its favour. Empty bounds give a degenerate
    /// box at the transform's origin.
    #[must_use]
    pub fn from_bounds(bounds: &Aabb, transform: &RigidTransform, scale: &Vector3<f64>) -> Self {
        let origin = Point3::from(transform.translation);
        if bounds.is_empty() {
            return Self::degenerate(origin);
        }

        let rotation: Matrix3<f64> = transform.rotation.to_rotation_matrix().into_inner();
        let local_center = bounds.center().coords.component_mul(scale);
        Self::new(
            origin + rotation * local_center,
            [
                rotation.column(0).into_owned(),
                rotation.column(1).into_owned(),
                rotation.column(2).into_owned(),
            ],
            bounds.half_extents().component_mul(scale),
        )
    }

    /// The 8 corners of the box.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let [ax, ay, az] = self.axes;
        let ex = ax * self.half_extents.x;
        let ey = ay * self.half_extents.y;
        let ez = az * self.half_extents.z;
        let c = self.center;
        [
            c - ex - ey - ez,
            c + ex - ey - ez,
            c - ex + ey - ez,
            c + ex + ey - ez,
            c - ex - ey + ez,
            c + ex - ey + ez,
            c - ex + ey + ez,
            c + ex + ey + ez,
        ]
    }

    /// Projects all corners onto `axis`, returning `(min, max)`.
    #[must_use]
    pub fn project(&self, axis: &Vector3<f64>) -> (f64, f64) {
        self.corners()
            .iter()
            .map(|corner| corner.coords.dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    /// Half-width of the box's projection onto a unit `axis`.
    #[must_use]
    pub fn projected_radius(&self, axis: &Vector3<f64>) -> f64 {
        self.axes
            .iter()
            .zip(self.half_extents.iter())
            .map(|(a, h)| h * a.dot(axis).abs())
            .sum()
    }

    /// Check if a point is inside the box (boundary inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let d = point - self.center;
        self.axes
            .iter()
            .zip(self.half_extents.iter())
            .all(|(a, h)| d.dot(a).abs() <= *h)
    }

    /// Full extent of the box along world x.
    #[must_use]
    pub fn width_x(&self) -> f64 {
        2.0 * self.projected_radius(&Vector3::x())
    }
}
