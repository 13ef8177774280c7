//! Centroid-based correspondence alignment.
//!
//! The interactive aligner solves for translation only: the output moves the
//! source centroid onto the target centroid. Rotation and scale differences
//! between the point sets are not solved for. Use
//! [`solve_rigid_transform`](crate::solve_rigid_transform) when a full rigid
//! fit is wanted.

use dental_types::{Point2, Point3, RigidTransform, centroid};
use tracing::{debug, warn};

use crate::projector::ViewProjector;

/// Minimum number of complete correspondences before a solve runs.
pub const MIN_CORRESPONDENCES: usize = 3;

/// Aligns `source` onto `target` by centroid translation.
///
/// Returns a pure translation equal to `centroid(target) - centroid(source)`.
/// When the sets differ in length or hold fewer than
/// [`MIN_CORRESPONDENCES`] points the identity is returned; the user may
/// simply not have placed enough points yet.
///
/// The caller applies the result on top of the node's existing transform
/// (see [`RigidTransform::then`]).
///
/// # Example
///
/// ```
/// use dental_registration::align_point_sets;
/// use nalgebra::{Point3, Vector3};
///
/// let source = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(0.0, 3.0, 0.0),
/// ];
/// let target: Vec<_> = source.iter().map(|p| p + Vector3::new(1.0, 2.0, 3.0)).collect();
///
/// let transform = align_point_sets(&source, &target);
/// assert!((transform.translation - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn align_point_sets(source: &[Point3<f64>], target: &[Point3<f64>]) -> RigidTransform {
    if source.len() != target.len() || source.len() < MIN_CORRESPONDENCES {
        debug!(
            "Skipping alignment: {} source / {} target points (need {} pairs)",
            source.len(),
            target.len(),
            MIN_CORRESPONDENCES
        );
        return RigidTransform::identity();
    }

    let (Some(source_centroid), Some(target_centroid)) = (centroid(source), centroid(target))
    else {
        return RigidTransform::identity();
    };

    let translation = target_centroid - source_centroid;
    debug!(
        "Centroid alignment over {} pairs: translation ({:.3}, {:.3}, {:.3})",
        source.len(),
        translation.x,
        translation.y,
        translation.z
    );
    RigidTransform::from_translation(translation)
}

/// Aligns model points to photo points picked on screen.
///
/// The model centroid is projected to find a common depth; each screen
/// point is unprojected at that depth to synthesize a 3D target, and the
/// 3D-3D aligner runs on the result. Without a projector the identity is
/// returned.
#[must_use]
pub fn align_2d_to_3d(
    model_points: &[Point3<f64>],
    screen_points: &[Point2<f64>],
    projector: Option<&dyn ViewProjector>,
) -> RigidTransform {
    let Some(projector) = projector else {
        warn!("Photo alignment requested without a view projector; leaving model unchanged");
        return RigidTransform::identity();
    };
    if model_points.len() != screen_points.len() || model_points.len() < MIN_CORRESPONDENCES {
        debug!(
            "Skipping photo alignment: {} model / {} photo points",
            model_points.len(),
            screen_points.len()
        );
        return RigidTransform::identity();
    }

    let targets = unproject_at_common_depth(model_points, screen_points, projector);
    align_point_sets(model_points, &targets)
}

/// Unprojects screen points at the projected depth of the model centroid.
pub(crate) fn unproject_at_common_depth(
    model_points: &[Point3<f64>],
    screen_points: &[Point2<f64>],
    projector: &dyn ViewProjector,
) -> Vec<Point3<f64>> {
    let Some(model_centroid) = centroid(model_points) else {
        return Vec::new();
    };
    let depth = projector.project_point(&model_centroid).z;
    screen_points
        .iter()
        .map(|s| projector.unproject_point(&Point3::new(s.x, s.y, depth)))
        .collect()
}

/// Root-mean-square distance between transformed source points and targets.
///
/// Returns 0.0 for empty or mismatched input.
#[must_use]
pub fn alignment_rms(
    source: &[Point3<f64>],
    target: &[Point3<f64>],
    transform: &RigidTransform,
) -> f64 {
    if source.is_empty() || source.len() != target.len() {
        return 0.0;
    }
    let sum_sq: f64 = source
        .iter()
        .zip(target)
        .map(|(s, t)| (transform.transform_point(s) - t).norm_squared())
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let n = source.len() as f64;
    (sum_sq / n).sqrt()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::PerspectiveProjector;
    use approx::assert_relative_eq;
    use dental_types::{UnitQuaternion, Vector3};
    use std::f64::consts::PI;

    fn triangle() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(1.0, 5.0, -2.0),
        ]
    }

    #[test]
    fn test_translation_equals_centroid_difference() {
        let source = triangle();
        let target = vec![
            Point3::new(10.0, 1.0, 0.0),
            Point3::new(12.0, 3.0, 3.0),
            Point3::new(11.0, 8.0, 0.0),
        ];
        let c1 = centroid(&source).unwrap();
        let c2 = centroid(&target).unwrap();

        let transform = align_point_sets(&source, &target);
        assert!(transform.is_pure_translation(1e-12));
        assert_relative_eq!(transform.translation, c2 - c1, epsilon = 1e-12);

        let moved: Vec<_> = source.iter().map(|p| transform.transform_point(p)).collect();
        assert_relative_eq!(centroid(&moved).unwrap().coords, c2.coords, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_sets_give_zero_translation() {
        let points = triangle();
        let transform = align_point_sets(&points, &points);
        assert!(transform.is_identity(1e-12));
    }

    #[test]
    fn test_too_few_points_is_identity() {
        let source = &triangle()[..2];
        let target = vec![Point3::new(5.0, 0.0, 0.0), Point3::new(6.0, 0.0, 0.0)];
        assert!(align_point_sets(source, &target).is_identity(1e-12));
    }

    #[test]
    fn test_mismatched_lengths_is_identity() {
        let source = triangle();
        let mut target = triangle();
        target.push(Point3::new(1.0, 1.0, 1.0));
        assert!(align_point_sets(&source, &target).is_identity(1e-12));
    }

    #[test]
    fn test_rotation_is_not_solved() {
        // Rotation about the centroid leaves the centroid fixed
        let source = vec![
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, -2.0, 0.0),
        ];
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 3.0);
        let target: Vec<_> = source.iter().map(|p| rotation * p).collect();

        let transform = align_point_sets(&source, &target);
        assert!(transform.is_identity(1e-12));
        assert!(alignment_rms(&source, &target, &transform) > 0.5);
    }

    #[test]
    fn test_alignment_rms_zero_for_exact_translation() {
        let source = triangle();
        let target: Vec<_> = source.iter().map(|p| p + Vector3::new(1.0, -1.0, 2.0)).collect();
        let transform = align_point_sets(&source, &target);
        assert_relative_eq!(alignment_rms(&source, &target, &transform), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_align_2d_without_projector_is_identity() {
        let screen = vec![Point2::new(1.0, 1.0); 3];
        assert!(align_2d_to_3d(&triangle(), &screen, None).is_identity(1e-12));
    }

    #[test]
    fn test_align_2d_recovers_in_plane_translation() {
        let camera = PerspectiveProjector::look_at(
            Point3::new(0.0, 0.0, 120.0),
            Point3::origin(),
            Vector3::y(),
            0.7,
            (1024.0, 768.0),
        );
        // All model points share a view depth, so unprojection is exact
        let model = vec![
            Point3::new(-10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 6.0, 0.0),
            Point3::new(0.0, -6.0, 0.0),
        ];
        let shift = Vector3::new(5.0, -3.0, 0.0);
        let screen: Vec<_> = model
            .iter()
            .map(|p| {
                let s = camera.project_point(&(p + shift));
                Point2::new(s.x, s.y)
            })
            .collect();

        let transform = align_2d_to_3d(&model, &screen, Some(&camera));
        assert_relative_eq!(transform.translation, shift, epsilon = 1e-6);
    }
}
