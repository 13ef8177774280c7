//! The clinical constraint validator.
//!
//! Runs three independent checks over a snapshot of the arch, in a fixed
//! order so the report text is deterministic:
//!
//! 1. **Collisions** between any two teeth
//! 2. **Bilateral symmetry** about the midline landmark
//! 3. **Arch integrity**: canine-to-canine width and neighbouring gaps
//!
//! A failing or impossible check never stops the others. Golden-proportion
//! analysis runs last and only produces warnings.

use std::collections::BTreeMap;

use dental_collision::{Collidable, Obb, PosedTooth, detect_all_collisions_with, separation_distance};
use dental_types::{
    ARCH_SEQUENCE, Landmarks, Side, ToothClass, ToothId, ToothNode, ToothState, VectorExt,
};
use tracing::{debug, info, warn};

use crate::params::GOLDEN_RATIO;
use crate::{ValidateResult, ValidationParams, ValidationReport};

/// Validates tooth arrangements against clinical constraints.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use dental_types::Landmarks;
/// use dental_validate::Validator;
///
/// let validator = Validator::default();
/// let report = validator.validate(&BTreeMap::new(), &BTreeMap::new(), &Landmarks::new());
///
/// // No midline and no canines: both checks fail, the collision check passes.
/// assert!(!report.has_collisions);
/// assert!(!report.is_symmetric);
/// assert!(!report.arch_integrity_valid);
/// assert!(!report.passed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    params: ValidationParams,
}

impl Validator {
    /// Creates a validator with the given thresholds.
    ///
    /// The thresholds are taken as given; use [`Validator::try_new`] to
    /// check them first.
    #[must_use]
    pub const fn new(params: ValidationParams) -> Self {
        Self { params }
    }

    /// Creates a validator, rejecting invalid thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidParameter`](crate::ValidateError::InvalidParameter)
    /// if [`ValidationParams::validate`] fails.
    pub fn try_new(params: ValidationParams) -> ValidateResult<Self> {
        params.validate()?;
        Ok(Self::new(params))
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn params(&self) -> &ValidationParams {
        &self.params
    }

    /// Runs every check and assembles the report.
    #[must_use]
    pub fn validate(
        &self,
        teeth: &BTreeMap<ToothId, ToothNode>,
        states: &BTreeMap<ToothId, ToothState>,
        landmarks: &Landmarks,
    ) -> ValidationReport {
        info!(teeth = teeth.len(), "Validating arch");
        let boxes = world_boxes(teeth, states);

        let mut report = ValidationReport {
            collision_pairs: self.collision_pairs(teeth, states),
            ..ValidationReport::default()
        };
        report.has_collisions = !report.collision_pairs.is_empty();

        report.symmetry_errors = self.symmetry_errors(&boxes, states, landmarks);
        report.is_symmetric = report.symmetry_errors.is_empty();

        let (arch_width, arch_errors) = self.arch_errors(&boxes);
        report.arch_width = arch_width;
        report.arch_errors = arch_errors;
        report.arch_integrity_valid = report.arch_errors.is_empty();

        report.proportion_warnings = self.proportion_warnings(&boxes);
        report.finish();

        if report.passed {
            info!("Arch validation passed");
        } else {
            warn!(
                collisions = report.collision_pairs.len(),
                symmetry_errors = report.symmetry_errors.len(),
                arch_errors = report.arch_errors.len(),
                "Arch validation failed"
            );
        }
        report
    }

    /// Colliding tooth pairs, in tooth id order.
    #[must_use]
    pub fn collision_pairs(
        &self,
        teeth: &BTreeMap<ToothId, ToothNode>,
        states: &BTreeMap<ToothId, ToothState>,
    ) -> Vec<(ToothId, ToothId)> {
        let ids: Vec<ToothId> = teeth.keys().copied().collect();
        let posed: Vec<PosedTooth<'_>> = teeth
            .iter()
            .map(|(id, node)| PosedTooth::new(node, states.get(id)))
            .collect();

        detect_all_collisions_with(&posed, &self.params.broad_phase)
            .into_iter()
            .map(|pair| {
                let (a, b) = (ids[pair.first], ids[pair.second]);
                warn!(
                    "Collision between {a} and {b}: penetration {:.3}mm",
                    pair.result.penetration_depth
                );
                (a, b)
            })
            .collect()
    }

    fn symmetry_errors(
        &self,
        boxes: &BTreeMap<ToothId, Obb>,
        states: &BTreeMap<ToothId, ToothState>,
        landmarks: &Landmarks,
    ) -> Vec<String> {
        let Some(midline) = landmarks.midline() else {
            warn!("Symmetry check skipped: no midline landmark");
            return vec!["Missing midline landmark".to_string()];
        };

        let p = &self.params;
        let mut errors = Vec::new();
        for class in ToothClass::ALL {
            let right = ToothId::new(class, Side::Right);
            let left = ToothId::new(class, Side::Left);
            let (a, b) = match (boxes.get(&right), boxes.get(&left)) {
                (Some(a), Some(b)) => (a, b),
                (None, None) => continue,
                (Some(_), None) => {
                    errors.push(format!("{class}: missing {left}"));
                    continue;
                }
                (None, Some(_)) => {
                    errors.push(format!("{class}: missing {right}"));
                    continue;
                }
            };

            let distance_diff =
                ((a.center.x - midline.x).abs() - (b.center.x - midline.x).abs()).abs();
            if distance_diff > p.symmetry_position_tolerance {
                errors.push(format!(
                    "{class}: distance from midline differs by {distance_diff:.2}mm (max {:.2}mm)",
                    p.symmetry_position_tolerance
                ));
            }

            let height_diff = (a.center.y - b.center.y).abs();
            if height_diff > p.symmetry_height_tolerance {
                errors.push(format!(
                    "{class}: height differs by {height_diff:.2}mm (max {:.2}mm)",
                    p.symmetry_height_tolerance
                ));
            }

            if states.contains_key(&right) || states.contains_key(&left) {
                let scale_r = states.get(&right).map_or(1.0, |s| s.scale.y);
                let scale_l = states.get(&left).map_or(1.0, |s| s.scale.y);
                let scale_diff = (scale_r - scale_l).abs();
                if scale_diff > p.symmetry_scale_tolerance {
                    errors.push(format!(
                        "{class}: vertical scale differs by {:.0}% (max {:.0}%)",
                        scale_diff * 100.0,
                        p.symmetry_scale_tolerance * 100.0
                    ));
                }
            }
        }

        for error in &errors {
            warn!("Symmetry: {error}");
        }
        errors
    }

    fn arch_errors(&self, boxes: &BTreeMap<ToothId, Obb>) -> (Option<f64>, Vec<String>) {
        let p = &self.params;
        let canine_r = ToothId::new(ToothClass::Canine, Side::Right);
        let canine_l = ToothId::new(ToothClass::Canine, Side::Left);

        let (Some(right), Some(left)) = (boxes.get(&canine_r), boxes.get(&canine_l)) else {
            let missing: Vec<String> = [canine_r, canine_l]
                .iter()
                .filter(|id| !boxes.contains_key(*id))
                .map(ToString::to_string)
                .collect();
            warn!("Arch check skipped: missing {}", missing.join(", "));
            return (None, vec![format!("Missing canine(s): {}", missing.join(", "))]);
        };

        let mut errors = Vec::new();
        let width = (left.center - right.center).horizontal_length();
        if width < p.min_arch_width || width > p.max_arch_width {
            errors.push(format!(
                "Arch width {width:.2}mm outside {:.2}-{:.2}mm",
                p.min_arch_width, p.max_arch_width
            ));
        }

        for pair in ARCH_SEQUENCE.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(box_a), Some(box_b)) = (boxes.get(&a), boxes.get(&b)) else {
                debug!("Gap check skipped for {a}-{b}: tooth missing");
                continue;
            };
            let gap = separation_distance(box_a, box_b);
            if gap < p.min_proximal_distance {
                errors.push(format!(
                    "{a}-{b}: gap {gap:.2}mm below minimum {:.2}mm",
                    p.min_proximal_distance
                ));
            } else if gap > p.max_proximal_gap {
                errors.push(format!(
                    "{a}-{b}: gap {gap:.2}mm exceeds maximum {:.2}mm",
                    p.max_proximal_gap
                ));
            }
        }

        for error in &errors {
            warn!("Arch: {error}");
        }
        (Some(width), errors)
    }

    fn proportion_warnings(&self, boxes: &BTreeMap<ToothId, Obb>) -> Vec<String> {
        let mut warnings = Vec::new();
        for side in [Side::Right, Side::Left] {
            let width = |class| boxes.get(&ToothId::new(class, side)).map(Obb::width_x);
            let neighbours = [
                (ToothClass::Central, ToothClass::Lateral),
                (ToothClass::Lateral, ToothClass::Canine),
            ];
            for (wide, narrow) in neighbours {
                let (Some(w), Some(n)) = (width(wide), width(narrow)) else {
                    continue;
                };
                if n <= f64::EPSILON {
                    continue;
                }
                let ratio = w / n;
                let deviation = (ratio - GOLDEN_RATIO).abs() / GOLDEN_RATIO;
                if deviation > self.params.golden_ratio_tolerance {
                    warnings.push(format!(
                        "{wide}/{narrow} width ratio on {side} side is {ratio:.2} (target {GOLDEN_RATIO})",
                    ));
                }
            }
        }
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "Proportion warnings");
        }
        warnings
    }
}

/// World boxes of every tooth, keyed by id.
fn world_boxes(
    teeth: &BTreeMap<ToothId, ToothNode>,
    states: &BTreeMap<ToothId, ToothState>,
) -> BTreeMap<ToothId, Obb> {
    teeth
        .iter()
        .map(|(id, node)| (*id, PosedTooth::new(node, states.get(id)).world_obb()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dental_collision::BroadPhaseParams;
    use dental_types::{Point3, Vector3};

    fn half() -> Vector3<f64> {
        Vector3::new(2.85, 5.0, 3.0)
    }

    fn arch_at(xs: [f64; 6]) -> BTreeMap<ToothId, ToothNode> {
        ARCH_SEQUENCE
            .iter()
            .zip(xs)
            .map(|(id, x)| (*id, ToothNode::box_shaped(*id, Point3::new(x, 0.0, 0.0), half())))
            .collect()
    }

    fn arch() -> BTreeMap<ToothId, ToothNode> {
        arch_at([-15.0, -9.0, -3.0, 3.0, 9.0, 15.0])
    }

    fn midline() -> Landmarks {
        Landmarks::new().with(Landmarks::MIDLINE, Point3::origin())
    }

    #[test]
    fn test_try_new_checks_params() {
        assert!(Validator::try_new(ValidationParams::default()).is_ok());
        assert!(Validator::try_new(ValidationParams::default().with_arch_width_range(45.0, 25.0)).is_err());
    }

    #[test]
    fn test_raw_broad_phase_gives_same_verdict() {
        // canine_L overlaps lateral_L by 0.7mm
        let teeth = arch_at([-15.0, -9.0, -3.0, 3.0, 9.0, 14.0]);
        let deduplicated = Validator::default().validate(&teeth, &BTreeMap::new(), &midline());
        let raw = Validator::new(
            ValidationParams::default().with_broad_phase(BroadPhaseParams::default().with_deduplicate(false)),
        )
        .validate(&teeth, &BTreeMap::new(), &midline());

        assert!(deduplicated.has_collisions);
        assert_eq!(raw.has_collisions, deduplicated.has_collisions);
        assert_eq!(raw.passed, deduplicated.passed);

        let lateral_l = ToothId::new(ToothClass::Lateral, Side::Left);
        let expected = vec![(lateral_l, ToothId::new(ToothClass::Canine, Side::Left))];
        assert_eq!(deduplicated.collision_pairs, expected);
        let mut raw_pairs = raw.collision_pairs.clone();
        raw_pairs.dedup();
        assert_eq!(raw_pairs, expected);
    }

    #[test]
    fn test_symmetric_arch_passes() {
        let report = Validator::default().validate(&arch(), &BTreeMap::new(), &midline());
        assert!(report.passed, "{}", report.summary());
        assert!(report.symmetry_errors.is_empty());
        assert_relative_eq!(report.arch_width.unwrap(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shifted_tooth_breaks_symmetry_once() {
        let mut teeth = arch();
        let lateral_l = ToothId::new(ToothClass::Lateral, Side::Left);
        let states = BTreeMap::new();
        teeth.get_mut(&lateral_l).unwrap().base_pose.translation.x += 3.0;

        let validator = Validator::default();
        let errors = validator.symmetry_errors(&world_boxes(&teeth, &states), &states, &midline());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("lateral:"), "{errors:?}");
    }

    #[test]
    fn test_height_and_scale_asymmetry() {
        let central_r = ToothId::new(ToothClass::Central, Side::Right);
        let mut states = BTreeMap::new();
        states.insert(
            central_r,
            ToothState::default()
                .with_offset(Vector3::new(0.0, 2.5, 0.0))
                .with_scale(Vector3::new(1.0, 1.2, 1.0)),
        );
        let validator = Validator::default();
        let errors = validator.symmetry_errors(&world_boxes(&arch(), &states), &states, &midline());
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[0].contains("height"));
        assert!(errors[1].contains("vertical scale differs by 20%"));
    }

    #[test]
    fn test_missing_midline_only_fails_symmetry() {
        let report = Validator::default().validate(&arch(), &BTreeMap::new(), &Landmarks::new());
        assert!(!report.is_symmetric);
        assert_eq!(report.symmetry_errors, vec!["Missing midline landmark".to_string()]);
        assert!(report.arch_integrity_valid);
        assert!(!report.has_collisions);
    }

    #[test]
    fn test_missing_counterpart_reported() {
        let mut teeth = arch();
        teeth.remove(&ToothId::new(ToothClass::Central, Side::Left));
        let states = BTreeMap::new();
        let errors = Validator::default().symmetry_errors(&world_boxes(&teeth, &states), &states, &midline());
        assert_eq!(errors, vec!["central: missing central_L".to_string()]);
    }

    #[test]
    fn test_arch_width_bounds_inclusive() {
        let validator = Validator::default();
        let width_errors = |half_width: f64| {
            let mut boxes = BTreeMap::new();
            let canine_r = ToothId::new(ToothClass::Canine, Side::Right);
            boxes.insert(canine_r, Obb::axis_aligned(Point3::new(-half_width, 0.0, 0.0), half()));
            boxes.insert(canine_r.counterpart(), Obb::axis_aligned(Point3::new(half_width, 0.0, 0.0), half()));
            validator.arch_errors(&boxes).1
        };
        assert!(width_errors(12.5).is_empty());
        assert!(width_errors(22.5).is_empty());
        assert_eq!(width_errors(12.45).len(), 1);
        assert_eq!(width_errors(22.55).len(), 1);
    }

    #[test]
    fn test_missing_canine_fails_arch_only() {
        let mut teeth = arch();
        teeth.remove(&ToothId::new(ToothClass::Canine, Side::Left));
        let (width, errors) = Validator::default().arch_errors(&world_boxes(&teeth, &BTreeMap::new()));
        assert!(width.is_none());
        assert_eq!(errors, vec!["Missing canine(s): canine_L".to_string()]);
    }

    #[test]
    fn test_tight_and_wide_gaps() {
        // central gap 0.1mm, lateral_L-canine_L gap 20.3mm
        let teeth = arch_at([-15.0, -9.0, -2.9, 2.9, 9.0, 35.0]);
        let (_, errors) = Validator::new(ValidationParams::default().with_arch_width_range(25.0, 80.0))
            .arch_errors(&world_boxes(&teeth, &BTreeMap::new()));
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[0].starts_with("central_R-central_L: gap 0.10mm below"));
        assert!(errors[1].starts_with("lateral_L-canine_L: gap 20.30mm exceeds"));
    }

    #[test]
    fn test_equal_widths_warn_on_proportion() {
        let boxes = world_boxes(&arch(), &BTreeMap::new());
        let warnings = Validator::default().proportion_warnings(&boxes);
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn test_golden_widths_do_not_warn() {
        let mut boxes = BTreeMap::new();
        for side in [Side::Right, Side::Left] {
            for (class, w) in [(ToothClass::Central, 8.5), (ToothClass::Lateral, 5.25), (ToothClass::Canine, 3.25)] {
                boxes.insert(
                    ToothId::new(class, side),
                    Obb::axis_aligned(Point3::origin(), Vector3::new(w / 2.0, 5.0, 3.0)),
                );
            }
        }
        assert!(Validator::default().proportion_warnings(&boxes).is_empty());
    }
}
