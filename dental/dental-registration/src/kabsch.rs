//! Full rigid registration (Kabsch).
//!
//! This is an opt-in solver that recovers rotation as well as translation.
//! The interactive aligner in [`align`](crate::align_point_sets) stays
//! translation-only because downstream editing relies on that behaviour.

use dental_types::{Point3, RigidTransform, Vector3, centroid};
use nalgebra::{Matrix3, Rotation3, UnitQuaternion};

use crate::{MIN_CORRESPONDENCES, RegistrationError, RegistrationResult};

/// Computes the rigid transform minimising RMS distance from `source` to `target`.
///
/// Uses SVD of the cross-covariance of the centred point sets, with
/// reflection correction so the result is always a proper rotation. With
/// `compute_scale` a uniform scale is fitted as well.
///
/// # Errors
///
/// - [`RegistrationError::MismatchedLengths`] if the sets differ in length
/// - [`RegistrationError::InsufficientCorrespondences`] with fewer than 3 pairs
/// - [`RegistrationError::SvdFailed`] if the decomposition fails
///
/// # Example
///
/// ```
/// use dental_registration::solve_rigid_transform;
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
///
/// let source = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5);
/// let target: Vec<_> = source.iter().map(|p| rotation * p).collect();
///
/// let transform = solve_rigid_transform(&source, &target, false).unwrap();
/// assert!((transform.rotation.angle() - 0.5).abs() < 1e-6);
/// ```
pub fn solve_rigid_transform(
    source: &[Point3<f64>],
    target: &[Point3<f64>],
    compute_scale: bool,
) -> RegistrationResult<RigidTransform> {
    if source.len() != target.len() {
        return Err(RegistrationError::MismatchedLengths {
            source_len: source.len(),
            target_len: target.len(),
        });
    }
    if source.len() < MIN_CORRESPONDENCES {
        return Err(RegistrationError::InsufficientCorrespondences {
            required: MIN_CORRESPONDENCES,
            provided: source.len(),
        });
    }

    let (Some(source_centroid), Some(target_centroid)) = (centroid(source), centroid(target))
    else {
        return Err(RegistrationError::InsufficientCorrespondences {
            required: MIN_CORRESPONDENCES,
            provided: 0,
        });
    };

    let source_centered: Vec<Vector3<f64>> = source.iter().map(|p| p - source_centroid).collect();
    let target_centered: Vec<Vector3<f64>> = target.iter().map(|p| p - target_centroid).collect();

    // H = sum(source_i * target_i^T)
    let mut h = Matrix3::zeros();
    for (s, t) in source_centered.iter().zip(&target_centered) {
        h += s * t.transpose();
    }

    let svd = h.svd(true, true);
    let u = svd.u.ok_or(RegistrationError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(RegistrationError::SvdFailed)?;

    let mut rotation_matrix = v_t.transpose() * u.transpose();
    if rotation_matrix.determinant() < 0.0 {
        let mut v = v_t.transpose();
        for i in 0..3 {
            v[(i, 2)] = -v[(i, 2)];
        }
        rotation_matrix = v * u.transpose();
    }

    let rotation =
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation_matrix));

    let scale = if compute_scale {
        optimal_scale(&source_centered, &target_centered, &rotation)
    } else {
        1.0
    };

    let translation = target_centroid.coords - scale * (rotation * source_centroid.coords);
    Ok(RigidTransform::with_scale(rotation, translation, scale))
}

fn optimal_scale(
    source_centered: &[Vector3<f64>],
    target_centered: &[Vector3<f64>],
    rotation: &UnitQuaternion<f64>,
) -> f64 {
    let mut source_variance = 0.0;
    let mut cross_variance = 0.0;
    for (s, t) in source_centered.iter().zip(target_centered) {
        source_variance += s.norm_squared();
        cross_variance += (rotation * s).dot(t);
    }
    if source_variance > 1e-10 {
        cross_variance / source_variance
    } else {
        1.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn make_triangle() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_rotation_and_translation() {
        let source = make_triangle();
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
        let translation = Vector3::new(10.0, 5.0, 0.0);
        let target: Vec<_> = source
            .iter()
            .map(|p| Point3::from((rotation * p).coords + translation))
            .collect();

        let transform = solve_rigid_transform(&source, &target, false).unwrap();
        for (s, t) in source.iter().zip(&target) {
            assert_relative_eq!(transform.transform_point(s).coords, t.coords, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_with_scale() {
        let source = make_triangle();
        let target: Vec<_> = source.iter().map(|p| Point3::from(p.coords * 2.5)).collect();
        let transform = solve_rigid_transform(&source, &target, true).unwrap();
        assert_relative_eq!(transform.scale, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_reflection_yields_proper_rotation() {
        let source = make_triangle();
        let target: Vec<_> = source.iter().map(|p| Point3::new(-p.x, p.y, p.z)).collect();
        let transform = solve_rigid_transform(&source, &target, false).unwrap();
        let mat = transform.to_matrix4();
        assert!(mat.fixed_view::<3, 3>(0, 0).determinant() > 0.0);
    }

    #[test]
    fn test_errors() {
        let source = make_triangle();
        assert!(matches!(
            solve_rigid_transform(&source, &source[..2], false),
            Err(RegistrationError::MismatchedLengths { .. })
        ));
        assert!(matches!(
            solve_rigid_transform(&source[..2], &source[..2], false),
            Err(RegistrationError::InsufficientCorrespondences { required: 3, provided: 2 })
        ));
    }
}
