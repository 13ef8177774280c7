//! Per-tooth editing state.

use nalgebra::{UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position, rotation and scale deltas applied to a tooth's base geometry.
///
/// One state exists per tooth identifier. States are mutated by transform
/// commands and by the validator's snapping pass; collision and alignment
/// code only ever reads them.
///
/// Commands on a locked state are ignored and report `false`.
///
/// # Example
///
/// ```
/// use dental_types::{ToothState, Vector3};
///
/// let mut state = ToothState::default();
/// assert!(state.translate(Vector3::new(1.0, 0.0, 0.0)));
///
/// state.locked = true;
/// assert!(!state.translate(Vector3::new(1.0, 0.0, 0.0)));
/// assert_eq!(state.position_offset.x, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToothState {
    /// Translation applied on top of the base pose (mm).
    pub position_offset: Vector3<f64>,
    /// Euler rotation (roll about X, pitch about Y, yaw about Z) in radians,
    /// applied in the tooth's local frame.
    pub rotation: Vector3<f64>,
    /// Per-axis scale factors applied to the local geometry.
    pub scale: Vector3<f64>,
    /// Locked teeth ignore transform commands.
    pub locked: bool,
}

impl Default for ToothState {
    fn default() -> Self {
        Self {
            position_offset: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            locked: false,
        }
    }
}

impl ToothState {
    /// Creates an unlocked identity state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.position_offset = offset;
        self
    }

    /// Sets the per-axis scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the lock flag.
    #[must_use]
    pub const fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Moves the tooth by `delta`.
    pub fn translate(&mut self, delta: Vector3<f64>) -> bool {
        if self.locked {
            return false;
        }
        self.position_offset += delta;
        true
    }

    /// Adds Euler angle deltas (radians).
    pub fn rotate(&mut self, delta: Vector3<f64>) -> bool {
        if self.locked {
            return false;
        }
        self.rotation += delta;
        true
    }

    /// Multiplies the per-axis scale by `factors`. Non-positive factors are rejected.
    pub fn scale_by(&mut self, factors: Vector3<f64>) -> bool {
        if self.locked || factors.iter().any(|f| *f <= 0.0 || !f.is_finite()) {
            return false;
        }
        self.scale.component_mul_assign(&factors);
        true
    }

    /// Restores the identity state, keeping the lock flag.
    pub fn reset(&mut self) -> bool {
        if self.locked {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Rotation as a quaternion.
    #[must_use]
    pub fn rotation_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// The state reflected across the facial midline (the YZ plane).
    ///
    /// The X offset flips sign; rotations about Y and Z flip sign while
    /// rotation about X is preserved. Scale is unchanged and the result is
    /// unlocked.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            position_offset: Vector3::new(
                -self.position_offset.x,
                self.position_offset.y,
                self.position_offset.z,
            ),
            rotation: Vector3::new(self.rotation.x, -self.rotation.y, -self.rotation.z),
            scale: self.scale,
            locked: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        let state = ToothState::default();
        assert_eq!(state.scale, Vector3::new(1.0, 1.0, 1.0));
        assert!(state.rotation_quaternion().angle() < 1e-12);
        assert!(!state.locked);
    }

    #[test]
    fn test_commands_accumulate() {
        let mut state = ToothState::new();
        state.translate(Vector3::new(1.0, 0.0, 0.0));
        state.translate(Vector3::new(0.5, 2.0, 0.0));
        state.scale_by(Vector3::new(1.1, 1.0, 1.0));
        state.scale_by(Vector3::new(1.1, 1.0, 1.0));
        assert_eq!(state.position_offset, Vector3::new(1.5, 2.0, 0.0));
        assert_relative_eq!(state.scale.x, 1.21, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_rejects_non_positive() {
        let mut state = ToothState::new();
        assert!(!state.scale_by(Vector3::new(0.0, 1.0, 1.0)));
        assert!(!state.scale_by(Vector3::new(1.0, f64::NAN, 1.0)));
        assert_eq!(state.scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_locked_ignores_every_command() {
        let mut state = ToothState::new().with_offset(Vector3::new(2.0, 0.0, 0.0)).with_locked(true);
        assert!(!state.translate(Vector3::x()));
        assert!(!state.rotate(Vector3::y()));
        assert!(!state.scale_by(Vector3::new(2.0, 2.0, 2.0)));
        assert!(!state.reset());
        assert_eq!(state.position_offset.x, 2.0);
    }

    #[test]
    fn test_reset() {
        let mut state = ToothState::new().with_offset(Vector3::new(2.0, 3.0, 0.0));
        assert!(state.reset());
        assert_eq!(state, ToothState::default());
    }

    #[test]
    fn test_mirrored() {
        let mut state = ToothState::new().with_offset(Vector3::new(1.0, 2.0, 3.0)).with_locked(true);
        state.rotation = Vector3::new(0.1, 0.2, 0.3);
        let m = state.mirrored();
        assert_eq!(m.position_offset, Vector3::new(-1.0, 2.0, 3.0));
        assert_eq!(m.rotation, Vector3::new(0.1, -0.2, -0.3));
        assert!(!m.locked);
        assert_eq!(m.mirrored().position_offset, state.position_offset);
    }
}
