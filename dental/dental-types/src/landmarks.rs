//! Named facial landmarks.

use std::collections::BTreeMap;

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named landmark points in world space, supplied by the host's face detector.
///
/// # Example
///
/// ```
/// use dental_types::{Landmarks, Point3};
///
/// let landmarks = Landmarks::new().with(Landmarks::MIDLINE, Point3::new(0.0, 0.0, 0.0));
/// assert_eq!(landmarks.midline(), Some(Point3::origin()));
/// assert!(landmarks.get("nose_tip").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Landmarks {
    points: BTreeMap<String, Point3<f64>>,
}

impl Landmarks {
    /// Facial midline point, required by the symmetry check.
    pub const MIDLINE: &'static str = "midline";

    /// Creates an empty landmark set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a landmark (builder form).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, point: Point3<f64>) -> Self {
        self.insert(name, point);
        self
    }

    /// Inserts or replaces a landmark.
    pub fn insert(&mut self, name: impl Into<String>, point: Point3<f64>) {
        self.points.insert(name.into(), point);
    }

    /// Looks up a landmark by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Point3<f64>> {
        self.points.get(name).copied()
    }

    /// The midline landmark, if present.
    #[must_use]
    pub fn midline(&self) -> Option<Point3<f64>> {
        self.get(Self::MIDLINE)
    }

    /// Number of landmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no landmarks are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Point3<f64>)> for Landmarks {
    fn from_iter<I: IntoIterator<Item = (S, Point3<f64>)>>(iter: I) -> Self {
        let mut landmarks = Self::new();
        for (name, point) in iter {
            landmarks.insert(name, point);
        }
        landmarks
    }
}
