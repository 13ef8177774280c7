//! Contact analysis parameters.

use crate::{ContactError, ContactResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds for contact estimation and validation.
///
/// All distances are millimetres, areas mm², forces newtons.
///
/// # Example
///
/// ```
/// use dental_contact::ContactParams;
///
/// let params = ContactParams::default()
///     .with_search_radius(1.5)
///     .with_max_force(40.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactParams {
    /// Radius around a contact point within which surface vertices are sampled.
    pub search_radius: f64,

    /// Floor for the estimated overlap radius.
    ///
    /// Keeps the area strictly positive for point-starved regions instead of
    /// reporting "no contact".
    pub min_radius: f64,

    /// Smallest acceptable contact area.
    pub min_contact_area: f64,

    /// Largest acceptable contact area.
    pub max_contact_area: f64,

    /// Forces at or above this value are reported.
    pub max_force: f64,

    /// Target interproximal gap for the proximity score.
    pub ideal_distance: f64,

    /// Lower end of the proximity scoring range.
    pub min_distance: f64,

    /// Upper end of the proximity scoring range.
    pub max_distance: f64,

    /// Target area for the area score.
    pub ideal_contact_area: f64,

    /// Neighbouring teeth closer than this get an automatic contact.
    pub detection_distance: f64,
}

impl Default for ContactParams {
    fn default() -> Self {
        Self {
            search_radius: 2.0,
            min_radius: 0.1,
            min_contact_area: 0.1,
            max_contact_area: 2.0,
            max_force: 50.0,
            ideal_distance: 0.1,
            min_distance: 0.0,
            max_distance: 0.5,
            ideal_contact_area: 0.6,
            detection_distance: 0.5,
        }
    }
}

impl ContactParams {
    /// Create new params with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling radius.
    #[must_use]
    pub const fn with_search_radius(mut self, radius: f64) -> Self {
        self.search_radius = radius;
        self
    }

    /// Set the minimum overlap radius.
    #[must_use]
    pub const fn with_min_radius(mut self, radius: f64) -> Self {
        self.min_radius = radius;
        self
    }

    /// Set the acceptable contact area range.
    #[must_use]
    pub const fn with_area_range(mut self, min: f64, max: f64) -> Self {
        self.min_contact_area = min;
        self.max_contact_area = max;
        self
    }

    /// Set the maximum force.
    #[must_use]
    pub const fn with_max_force(mut self, force: f64) -> Self {
        self.max_force = force;
        self
    }

    /// Set the proximity scoring distances.
    #[must_use]
    pub const fn with_distances(mut self, ideal: f64, min: f64, max: f64) -> Self {
        self.ideal_distance = ideal;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Set the automatic detection distance.
    #[must_use]
    pub const fn with_detection_distance(mut self, distance: f64) -> Self {
        self.detection_distance = distance;
        self
    }

    /// Check the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> ContactResult<()> {
        let values = [
            self.search_radius,
            self.min_radius,
            self.min_contact_area,
            self.max_contact_area,
            self.max_force,
            self.ideal_distance,
            self.min_distance,
            self.max_distance,
            self.ideal_contact_area,
            self.detection_distance,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ContactError::InvalidParameter("all values must be finite"));
        }
        if self.search_radius <= 0.0 {
            return Err(ContactError::InvalidParameter("search_radius must be positive"));
        }
        if self.min_radius < 0.0 {
            return Err(ContactError::InvalidParameter("min_radius cannot be negative"));
        }
        if self.min_contact_area < 0.0 || self.min_contact_area > self.max_contact_area {
            return Err(ContactError::InvalidParameter(
                "contact area range must satisfy 0 <= min <= max",
            ));
        }
        if self.max_force <= 0.0 {
            return Err(ContactError::InvalidParameter("max_force must be positive"));
        }
        if self.min_distance >= self.max_distance {
            return Err(ContactError::InvalidParameter(
                "min_distance must be below max_distance",
            ));
        }
        if self.detection_distance < 0.0 {
            return Err(ContactError::InvalidParameter(
                "detection_distance cannot be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(ContactParams::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let bad = [
            ContactParams::default().with_search_radius(0.0),
            ContactParams::default().with_min_radius(-0.1),
            ContactParams::default().with_area_range(2.0, 1.0),
            ContactParams::default().with_max_force(0.0),
            ContactParams::default().with_distances(0.1, 0.5, 0.5),
            ContactParams::default().with_detection_distance(f64::NAN),
        ];
        for params in bad {
            assert!(
                matches!(params.validate(), Err(ContactError::InvalidParameter(_))),
                "{params:?} should be rejected"
            );
        }
    }
}
