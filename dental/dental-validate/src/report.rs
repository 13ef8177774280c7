//! Validation report and its text summary.

use std::fmt::Write;

use dental_types::ToothId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collision pairs listed in the summary before truncating.
pub const SUMMARY_MAX_COLLISIONS: usize = 3;
/// Symmetry errors listed in the summary before truncating.
pub const SUMMARY_MAX_SYMMETRY_ERRORS: usize = 2;
/// Arch errors listed in the summary before truncating.
pub const SUMMARY_MAX_ARCH_ERRORS: usize = 2;

/// Result of validating an arch.
///
/// Every check runs regardless of the others; `passed` is the conjunction
/// of the three check flags. Proportion warnings are advisory.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationReport {
    /// True if any two teeth intersect.
    pub has_collisions: bool,
    /// True if left and right teeth mirror each other within tolerance.
    pub is_symmetric: bool,
    /// True if arch width and proximal gaps are plausible.
    pub arch_integrity_valid: bool,
    /// Conjunction of the three flags above.
    pub passed: bool,
    /// Colliding tooth pairs.
    pub collision_pairs: Vec<(ToothId, ToothId)>,
    /// Symmetry diagnostics.
    pub symmetry_errors: Vec<String>,
    /// Arch integrity diagnostics.
    pub arch_errors: Vec<String>,
    /// Golden-proportion advisories.
    pub proportion_warnings: Vec<String>,
    /// Canine-to-canine width, when both canines are present.
    pub arch_width: Option<f64>,
}

impl ValidationReport {
    /// Recomputes `passed` from the check flags.
    pub(crate) fn finish(&mut self) {
        self.passed = !self.has_collisions && self.is_symmetric && self.arch_integrity_valid;
    }

    /// Total number of errors across all checks.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.collision_pairs.len() + self.symmetry_errors.len() + self.arch_errors.len()
    }

    /// Multi-line human readable summary.
    ///
    /// Sections appear in check order (collisions, symmetry, arch) and only
    /// for failed checks. Each lists at most three collisions or two errors,
    /// followed by `  ...and N more` when truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use dental_validate::ValidationReport;
    ///
    /// let report = ValidationReport {
    ///     is_symmetric: false,
    ///     arch_integrity_valid: true,
    ///     symmetry_errors: vec!["a".into(), "b".into(), "c".into()],
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     report.summary(),
    ///     "Validation failed\nSymmetry issues (3):\n  a\n  b\n  ...and 1 more"
    /// );
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed {
            return "Validation passed".to_string();
        }

        let mut out = String::from("Validation failed");

        if self.has_collisions {
            let pairs: Vec<String> = self
                .collision_pairs
                .iter()
                .map(|(a, b)| format!("{a} <-> {b}"))
                .collect();
            push_section(&mut out, "Collisions", &pairs, SUMMARY_MAX_COLLISIONS);
        }
        if !self.is_symmetric {
            push_section(
                &mut out,
                "Symmetry issues",
                &self.symmetry_errors,
                SUMMARY_MAX_SYMMETRY_ERRORS,
            );
        }
        if !self.arch_integrity_valid {
            push_section(
                &mut out,
                "Arch integrity issues",
                &self.arch_errors,
                SUMMARY_MAX_ARCH_ERRORS,
            );
        }

        out
    }
}

fn push_section(out: &mut String, title: &str, items: &[String], limit: usize) {
    let _ = write!(out, "\n{title} ({}):", items.len());
    for item in items.iter().take(limit) {
        let _ = write!(out, "\n  {item}");
    }
    if items.len() > limit {
        let _ = write!(out, "\n  ...and {} more", items.len() - limit);
    }
}
