//! Validation thresholds.

use dental_collision::BroadPhaseParams;

use crate::{ValidateError, ValidateResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The golden ratio used as the target for neighbouring tooth widths.
pub const GOLDEN_RATIO: f64 = 1.618;

/// Thresholds for the clinical checks. Lengths in millimetres.
///
/// # Example
///
/// ```
/// use dental_validate::ValidationParams;
///
/// let params = ValidationParams::default().with_arch_width_range(28.0, 40.0);
/// assert!(params.validate().is_ok());
/// assert!(ValidationParams::default().with_arch_width_range(40.0, 28.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationParams {
    /// Maximum difference between left and right distance from the midline.
    pub symmetry_position_tolerance: f64,
    /// Maximum difference between left and right vertical position.
    pub symmetry_height_tolerance: f64,
    /// Maximum difference between left and right vertical scale (0.10 = 10%).
    pub symmetry_scale_tolerance: f64,
    /// Smallest plausible canine-to-canine width.
    pub min_arch_width: f64,
    /// Largest plausible canine-to-canine width.
    pub max_arch_width: f64,
    /// Smallest acceptable gap between neighbouring teeth.
    pub min_proximal_distance: f64,
    /// Largest plausible gap between neighbouring teeth.
    pub max_proximal_gap: f64,
    /// Relative deviation from [`GOLDEN_RATIO`] tolerated before warning.
    pub golden_ratio_tolerance: f64,
    /// Collision broad-phase options.
    pub broad_phase: BroadPhaseParams,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            symmetry_position_tolerance: 2.0,
            symmetry_height_tolerance: 2.0,
            symmetry_scale_tolerance: 0.10,
            min_arch_width: 25.0,
            max_arch_width: 45.0,
            min_proximal_distance: 0.2,
            max_proximal_gap: 20.0,
            golden_ratio_tolerance: 0.15,
            broad_phase: BroadPhaseParams::default(),
        }
    }
}

impl ValidationParams {
    /// Create new params with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symmetry tolerances.
    #[must_use]
    pub const fn with_symmetry_tolerances(mut self, position: f64, height: f64, scale: f64) -> Self {
        self.symmetry_position_tolerance = position;
        self.symmetry_height_tolerance = height;
        self.symmetry_scale_tolerance = scale;
        self
    }

    /// Set the plausible arch width range (inclusive).
    #[must_use]
    pub const fn with_arch_width_range(mut self, min: f64, max: f64) -> Self {
        self.min_arch_width = min;
        self.max_arch_width = max;
        self
    }

    /// Set the proximal gap limits.
    #[must_use]
    pub const fn with_proximal_limits(mut self, min_distance: f64, max_gap: f64) -> Self {
        self.min_proximal_distance = min_distance;
        self.max_proximal_gap = max_gap;
        self
    }

    /// Set the golden-ratio tolerance.
    #[must_use]
    pub const fn with_golden_ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.golden_ratio_tolerance = tolerance;
        self
    }

    /// Set the broad-phase options.
    #[must_use]
    pub const fn with_broad_phase(mut self, broad_phase: BroadPhaseParams) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    /// Check the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> ValidateResult<()> {
        let tolerances = [
            self.symmetry_position_tolerance,
            self.symmetry_height_tolerance,
            self.symmetry_scale_tolerance,
            self.golden_ratio_tolerance,
        ];
        if tolerances.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ValidateError::InvalidParameter(
                "tolerances must be finite and non-negative",
            ));
        }
        if !(self.min_arch_width.is_finite() && self.max_arch_width.is_finite())
            || self.min_arch_width > self.max_arch_width
        {
            return Err(ValidateError::InvalidParameter(
                "arch width range must satisfy min <= max",
            ));
        }
        if !(self.min_proximal_distance.is_finite() && self.max_proximal_gap.is_finite())
            || self.min_proximal_distance > self.max_proximal_gap
        {
            return Err(ValidateError::InvalidParameter(
                "proximal limits must satisfy min_distance <= max_gap",
            ));
        }
        if self.broad_phase.cell_size <= 0.0 || !self.broad_phase.cell_size.is_finite() {
            return Err(ValidateError::InvalidParameter(
                "broad phase cell size must be positive",
            ));
        }
        Ok(())
    }
}
