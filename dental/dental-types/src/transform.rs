//! Rigid transform applied to tooth nodes and produced by alignment.

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rigid transformation: rotation, translation, and uniform scale.
///
/// The transformation is applied in the order: scale -> rotate -> translate.
///
/// Alignment results are applied **on top of** a node's existing transform
/// with [`RigidTransform::then`], never by replacing it, so repeated partial
/// alignments accumulate.
///
/// # Example
///
/// ```
/// use dental_types::{RigidTransform, Point3, UnitQuaternion, Vector3};
/// use std::f64::consts::PI;
///
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.0);
/// let transform = RigidTransform::new(rotation, Vector3::new(1.0, 2.0, 3.0));
///
/// let moved = transform.transform_point(&Point3::new(0.0, 0.0, 1.0));
/// assert!((moved.x - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidTransform {
    /// Rotation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
    /// Translation vector.
    pub translation: Vector3<f64>,
    /// Uniform scale factor (default 1.0).
    pub scale: f64,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Creates a transform with the given rotation and translation and unit scale.
    #[must_use]
    pub const fn new(rotation: UnitQuaternion<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
            scale: 1.0,
        }
    }

    /// Creates a transform with rotation, translation, and scale.
    #[must_use]
    pub const fn with_scale(
        rotation: UnitQuaternion<f64>,
        translation: Vector3<f64>,
        scale: f64,
    ) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity(), Vector3::zeros())
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self::new(UnitQuaternion::identity(), translation)
    }

    /// A pure rotation about the origin.
    #[must_use]
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self::new(rotation, Vector3::zeros())
    }

    /// Transforms a point (scale -> rotate -> translate).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let scaled = point.coords * self.scale;
        Point3::from(self.rotation * scaled + self.translation)
    }

    /// Transforms a direction. Directions are scaled and rotated but not translated.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * (vector * self.scale)
    }

    /// Composes this transform with another (`self * other`).
    ///
    /// The result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * (other.translation * self.scale),
            scale: self.scale * other.scale,
        }
    }

    /// Applies `next` on top of this transform (post-multiplication).
    ///
    /// The result applies `self` first, then `next`. This is how an
    /// alignment correction is accumulated onto a node's existing transform.
    ///
    /// # Example
    ///
    /// ```
    /// use dental_types::{RigidTransform, Point3, Vector3};
    ///
    /// let existing = RigidTransform::from_translation(Vector3::new(1.0, 0.0, 0.0));
    /// let correction = RigidTransform::from_translation(Vector3::new(0.0, 2.0, 0.0));
    ///
    /// let updated = existing.then(&correction);
    /// assert_eq!(updated.transform_point(&Point3::origin()), Point3::new(1.0, 2.0, 0.0));
    /// ```
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        next.compose(self)
    }

    /// Computes the inverse of this transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_scale = 1.0 / self.scale;
        let inv_rotation = self.rotation.inverse();
        Self {
            rotation: inv_rotation,
            translation: inv_rotation * (-self.translation * inv_scale),
            scale: inv_scale,
        }
    }

    /// Converts to a 4x4 homogeneous matrix (column-vector convention).
    #[must_use]
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut mat = self.rotation.to_homogeneous();
        for i in 0..3 {
            for j in 0..3 {
                mat[(i, j)] *= self.scale;
            }
        }
        mat[(0, 3)] = self.translation.x;
        mat[(1, 3)] = self.translation.y;
        mat[(2, 3)] = self.translation.z;
        mat
    }

    /// A homogeneous translation matrix for `translation`.
    #[must_use]
    pub fn translation_matrix(translation: &Vector3<f64>) -> Matrix4<f64> {
        Matrix4::new_translation(translation)
    }

    /// Returns true if this transform is approximately the identity.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.rotation.angle().abs() < epsilon
            && self.translation.norm() < epsilon
            && (self.scale - 1.0).abs() < epsilon
    }

    /// Returns true if this transform has no rotation or scale component.
    #[must_use]
    pub fn is_pure_translation(&self, epsilon: f64) -> bool {
        self.rotation.angle().abs() < epsilon && (self.scale - 1.0).abs() < epsilon
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let point = Point3::new(1.0, 2.0, 3.0);
        let result = RigidTransform::identity().transform_point(&point);
        assert_relative_eq!(result.coords, point.coords, epsilon = 1e-10);
    }

    #[test]
    fn test_rotation_90_degrees_y() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.0);
        let result = RigidTransform::from_rotation(rotation).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(result.z, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_then_applies_existing_first() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
        let existing = RigidTransform::from_rotation(rotation);
        let correction = RigidTransform::from_translation(Vector3::new(10.0, 0.0, 0.0));

        let updated = existing.then(&correction);
        let p = updated.transform_point(&Point3::new(1.0, 0.0, 0.0));

        // Rotate (1,0,0) -> (0,1,0), then translate
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-10);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_repeated_corrections_accumulate() {
        let step = RigidTransform::from_translation(Vector3::new(0.5, 0.0, 0.0));
        let mut node = RigidTransform::identity();
        for _ in 0..4 {
            node = node.then(&step);
        }
        assert_relative_eq!(node.translation.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI / 5.0);
        let transform = RigidTransform::with_scale(rotation, Vector3::new(1.0, -2.0, 3.0), 1.5);
        let point = Point3::new(0.3, 0.7, -1.1);
        let recovered = transform.inverse().transform_point(&transform.transform_point(&point));
        assert_relative_eq!(recovered.coords, point.coords, epsilon = 1e-10);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let transform = RigidTransform::from_translation(Vector3::new(100.0, 0.0, 0.0));
        assert_eq!(transform.transform_vector(&Vector3::y()), Vector3::y());
    }

    #[test]
    fn test_matrix_matches_point_transform() {
        let rotation = UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3);
        let transform = RigidTransform::with_scale(rotation, Vector3::new(4.0, 5.0, 6.0), 2.0);
        let point = Point3::new(1.0, 2.0, 3.0);

        let via_matrix = transform.to_matrix4().transform_point(&point);
        let direct = transform.transform_point(&point);
        assert_relative_eq!(via_matrix.coords, direct.coords, epsilon = 1e-10);
    }

    #[test]
    fn test_translation_matrix() {
        let mat = RigidTransform::translation_matrix(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mat[(0, 3)], 1.0);
        assert_eq!(mat[(2, 3)], 3.0);
        assert_eq!(mat[(3, 3)], 1.0);
    }

    #[test]
    fn test_is_pure_translation() {
        assert!(RigidTransform::from_translation(Vector3::new(3.0, 0.0, 0.0)).is_pure_translation(1e-12));
        let rotated = RigidTransform::from_rotation(UnitQuaternion::from_euler_angles(0.0, 0.1, 0.0));
        assert!(!rotated.is_pure_translation(1e-6));
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(RigidTransform::default(), RigidTransform::identity());
        assert!(RigidTransform::default().is_identity(1e-12));
    }
}
