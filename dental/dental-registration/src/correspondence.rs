//! Correspondence pairs placed by the user.
//!
//! A pair links a point picked on the scan model (source) with either a
//! point picked on the photo (2D) or on a second model (3D). Pairs are
//! placed one click at a time, so incomplete pairs are normal.

use dental_types::{Point2, Point3, RigidTransform};
use tracing::{debug, warn};

use crate::align::{align_point_sets, unproject_at_common_depth};
use crate::kabsch::solve_rigid_transform;
use crate::projector::ViewProjector;
use crate::{MIN_CORRESPONDENCES, RegistrationError, RegistrationResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The target half of a correspondence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CorrespondenceTarget {
    /// A point on the photo, in viewport pixels.
    Photo(Point2<f64>),
    /// A point on a second model, in world space.
    Model(Point3<f64>),
}

/// One user-placed correspondence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrespondencePair {
    /// Placement order; stable across removals.
    pub index: usize,
    /// Model-space source point.
    pub source: Option<Point3<f64>>,
    /// Photo or model target point.
    pub target: Option<CorrespondenceTarget>,
}

impl CorrespondencePair {
    /// A pair is complete once both a source and a target are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}

/// How a correspondence set is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlignmentMode {
    /// Centroid translation only.
    #[default]
    Translation,
    /// Full rotation plus translation (Kabsch).
    Rigid,
}

/// An ordered collection of correspondence pairs.
///
/// # Example
///
/// ```
/// use dental_registration::CorrespondenceSet;
/// use nalgebra::{Point3, Vector3};
///
/// let mut set = CorrespondenceSet::new();
/// for p in [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)] {
///     let index = set.add_source(p);
///     set.set_model_target(index, p + Vector3::new(2.0, 0.0, 0.0));
/// }
///
/// assert!(set.can_solve());
/// let transform = set.solve(None);
/// assert!((transform.translation.x - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrespondenceSet {
    pairs: Vec<CorrespondencePair>,
    next_index: usize,
}

impl CorrespondenceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new pair with a source point; returns its index.
    pub fn add_source(&mut self, source: Point3<f64>) -> usize {
        self.push(Some(source), None)
    }

    /// Adds a complete pair; returns its index.
    pub fn add_pair(&mut self, source: Point3<f64>, target: CorrespondenceTarget) -> usize {
        self.push(Some(source), Some(target))
    }

    fn push(&mut self, source: Option<Point3<f64>>, target: Option<CorrespondenceTarget>) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        self.pairs.push(CorrespondencePair {
            index,
            source,
            target,
        });
        index
    }

    fn pair_mut(&mut self, index: usize) -> Option<&mut CorrespondencePair> {
        self.pairs.iter_mut().find(|p| p.index == index)
    }

    /// Replaces the source point of a pair. Returns `false` for an unknown index.
    pub fn set_source(&mut self, index: usize, source: Point3<f64>) -> bool {
        self.pair_mut(index).is_some_and(|p| {
            p.source = Some(source);
            true
        })
    }

    /// Sets a photo target, replacing any existing target.
    pub fn set_photo_target(&mut self, index: usize, target: Point2<f64>) -> bool {
        self.pair_mut(index).is_some_and(|p| {
            p.target = Some(CorrespondenceTarget::Photo(target));
            true
        })
    }

    /// Sets a model target, replacing any existing target.
    pub fn set_model_target(&mut self, index: usize, target: Point3<f64>) -> bool {
        self.pair_mut(index).is_some_and(|p| {
            p.target = Some(CorrespondenceTarget::Model(target));
            true
        })
    }

    /// Removes a pair by index.
    pub fn remove(&mut self, index: usize) -> Option<CorrespondencePair> {
        let pos = self.pairs.iter().position(|p| p.index == index)?;
        Some(self.pairs.remove(pos))
    }

    /// Removes every pair and restarts numbering.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.next_index = 0;
    }

    /// All pairs in placement order.
    #[must_use]
    pub fn pairs(&self) -> &[CorrespondencePair] {
        &self.pairs
    }

    /// Number of pairs (complete or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pairs exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Complete pairs in placement order.
    pub fn complete_pairs(&self) -> impl Iterator<Item = &CorrespondencePair> {
        self.pairs.iter().filter(|p| p.is_complete())
    }

    /// Number of complete pairs.
    #[must_use]
    pub fn complete_count(&self) -> usize {
        self.complete_pairs().count()
    }

    /// True once enough complete pairs exist to solve.
    #[must_use]
    pub fn can_solve(&self) -> bool {
        self.complete_count() >= MIN_CORRESPONDENCES
    }

    /// Solves with the translation-only aligner.
    ///
    /// Returns the identity when fewer than three pairs are complete, or when
    /// photo targets are present but no projector is available.
    #[must_use]
    pub fn solve(&self, projector: Option<&dyn ViewProjector>) -> RigidTransform {
        match self.resolve(projector) {
            Ok((source, target)) => align_point_sets(&source, &target),
            Err(err) => {
                debug!("Correspondence solve skipped: {err}");
                RigidTransform::identity()
            }
        }
    }

    /// Solves in the given mode, reporting why a solve could not run.
    ///
    /// # Errors
    ///
    /// Returns an error if too few pairs are complete, if photo targets
    /// exist without a projector, or if the rigid solver fails.
    pub fn solve_with(
        &self,
        mode: AlignmentMode,
        projector: Option<&dyn ViewProjector>,
    ) -> RegistrationResult<RigidTransform> {
        let (source, target) = self.resolve(projector)?;
        match mode {
            AlignmentMode::Translation => Ok(align_point_sets(&source, &target)),
            AlignmentMode::Rigid => solve_rigid_transform(&source, &target, false),
        }
    }

    /// Resolves complete pairs into matched 3D point lists.
    ///
    /// Photo targets are unprojected at the depth of the complete sources'
    /// centroid.
    fn resolve(
        &self,
        projector: Option<&dyn ViewProjector>,
    ) -> RegistrationResult<(Vec<Point3<f64>>, Vec<Point3<f64>>)> {
        let complete: Vec<(Point3<f64>, CorrespondenceTarget)> = self
            .complete_pairs()
            .filter_map(|p| p.source.zip(p.target))
            .collect();

        if complete.len() < MIN_CORRESPONDENCES {
            return Err(RegistrationError::InsufficientCorrespondences {
                required: MIN_CORRESPONDENCES,
                provided: complete.len(),
            });
        }

        let source: Vec<Point3<f64>> = complete.iter().map(|(s, _)| *s).collect();
        let photo: Vec<Point2<f64>> = complete
            .iter()
            .filter_map(|(_, t)| match t {
                CorrespondenceTarget::Photo(p) => Some(*p),
                CorrespondenceTarget::Model(_) => None,
            })
            .collect();

        let mut unprojected = if photo.is_empty() {
            Vec::new().into_iter()
        } else {
            let Some(projector) = projector else {
                warn!(
                    "{} photo correspondence(s) cannot be used without a view projector",
                    photo.len()
                );
                return Err(RegistrationError::ProjectorUnavailable);
            };
            unproject_at_common_depth(&source, &photo, projector).into_iter()
        };

        let mut target = Vec::with_capacity(complete.len());
        for (_, t) in &complete {
            match t {
                CorrespondenceTarget::Model(p) => target.push(*p),
                CorrespondenceTarget::Photo(_) => {
                    if let Some(p) = unprojected.next() {
                        target.push(p);
                    }
                }
            }
        }

        Ok((source, target))
    }
}
