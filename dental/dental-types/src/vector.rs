//! Vector helpers that stay total on degenerate input.

use nalgebra::{Point3, Vector3};

/// Lengths below this are treated as zero by [`VectorExt::normalize_or_zero`].
const ZERO_LENGTH: f64 = 1e-12;

/// Extension methods for [`Vector3<f64>`].
pub trait VectorExt {
    /// Returns the unit vector, or the zero vector for zero-length input.
    ///
    /// Unlike `nalgebra`'s `normalize`, this never produces NaN.
    ///
    /// # Example
    ///
    /// ```
    /// use dental_types::{Vector3, VectorExt};
    ///
    /// assert_eq!(Vector3::zeros().normalize_or_zero(), Vector3::zeros());
    /// assert_eq!(Vector3::new(0.0, 3.0, 0.0).normalize_or_zero(), Vector3::y());
    /// ```
    #[must_use]
    fn normalize_or_zero(&self) -> Self;

    /// Length of the vector projected onto the horizontal (X/Z) plane.
    #[must_use]
    fn horizontal_length(&self) -> f64;
}

impl VectorExt for Vector3<f64> {
    fn normalize_or_zero(&self) -> Self {
        let len = self.norm();
        if len < ZERO_LENGTH {
            Self::zeros()
        } else {
            self / len
        }
    }

    fn horizontal_length(&self) -> f64 {
        self.x.hypot(self.z)
    }
}

/// Computes the centroid of a set of points.
///
/// Returns `None` for an empty set.
///
/// # Example
///
/// ```
/// use dental_types::{centroid, Point3};
///
/// let c = centroid(&[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)]).unwrap();
/// assert_eq!(c, Point3::new(1.0, 2.0, 3.0));
/// assert!(centroid(&[]).is_none());
/// ```
#[must_use]
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / n))
}
