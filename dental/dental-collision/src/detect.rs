//! Batch collision detection over a set of teeth.

use dental_types::{Point3, RigidTransform, ToothNode, ToothState, Vector3, VectorExt};
use tracing::debug;

use crate::sat::{CollisionResult, test_intersection};
use crate::spatial_hash::{DEFAULT_CELL_SIZE, SpatialHash};
use crate::Obb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Anything that can be bounded by a world-space oriented box.
pub trait Collidable {
    /// The current world-space box.
    fn world_obb(&self) -> Obb;

    /// Position used for spatial hashing.
    fn world_position(&self) -> Point3<f64> {
        self.world_obb().center
    }
}

impl Collidable for Obb {
    fn world_obb(&self) -> Obb {
        *self
    }
}

/// A tooth node together with its editing state.
#[derive(Debug, Clone, Copy)]
pub struct PosedTooth<'a> {
    /// The tooth geometry.
    pub node: &'a ToothNode,
    /// Editing deltas, if any.
    pub state: Option<&'a ToothState>,
}

impl<'a> PosedTooth<'a> {
    /// Pairs a node with its state.
    #[must_use]
    pub const fn new(node: &'a ToothNode, state: Option<&'a ToothState>) -> Self {
        Self { node, state }
    }
}

impl Collidable for PosedTooth<'_> {
    fn world_obb(&self) -> Obb {
        let position = self.node.world_position(self.state);
        match &self.node.local_bounds {
            Some(bounds) => {
                let pose = RigidTransform::new(self.node.world_rotation(self.state), position.coords);
                Obb::from_bounds(bounds, &pose, &self.node.world_scale(self.state))
            }
            None => Obb::degenerate(position),
        }
    }

    fn world_position(&self) -> Point3<f64> {
        self.node.world_position(self.state)
    }
}

/// Broad-phase options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BroadPhaseParams {
    /// Spatial hash cell size in millimetres.
    pub cell_size: f64,
    /// Report each colliding pair once, sorted by index.
    ///
    /// When `false`, a pair is reported once per shared bucket in bucket
    /// order.
    pub deduplicate: bool,
}

impl Default for BroadPhaseParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            deduplicate: true,
        }
    }
}

impl BroadPhaseParams {
    /// Create new params with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial hash cell size.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set whether duplicate pairs are removed.
    #[must_use]
    pub const fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

/// A colliding pair, by index into the input slice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionPair {
    /// Lower index.
    pub first: usize,
    /// Higher index.
    pub second: usize,
    /// Intersection result with `first` as the box being corrected.
    pub result: CollisionResult,
}

/// Finds every intersecting pair with default broad-phase options.
///
/// # Example
///
/// ```
/// use dental_collision::{Obb, detect_all_collisions};
/// use nalgebra::{Point3, Vector3};
///
/// let boxes = [
///     Obb::axis_aligned(Point3::new(0.0, 0.0, 0.0), Vector3::repeat(1.0)),
///     Obb::axis_aligned(Point3::new(1.5, 0.0, 0.0), Vector3::repeat(1.0)),
///     Obb::axis_aligned(Point3::new(6.0, 0.0, 0.0), Vector3::repeat(1.0)),
/// ];
///
/// let pairs = detect_all_collisions(&boxes);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!((pairs[0].first, pairs[0].second), (0, 1));
/// ```
#[must_use]
pub fn detect_all_collisions<C: Collidable>(items: &[C]) -> Vec<CollisionPair> {
    detect_all_collisions_with(items, &BroadPhaseParams::default())
}

/// Finds every intersecting pair.
///
/// Objects are bucketed by world position in a [`SpatialHash`]; only pairs
/// that share a bucket are tested with [`test_intersection`].
#[must_use]
pub fn detect_all_collisions_with<C: Collidable>(
    items: &[C],
    params: &BroadPhaseParams,
) -> Vec<CollisionPair> {
    let boxes: Vec<Obb> = items.iter().map(Collidable::world_obb).collect();

    let mut hash = SpatialHash::new(params.cell_size);
    for (index, item) in items.iter().enumerate() {
        hash.insert_with_neighbors(index, &item.world_position());
    }

    let candidates = if params.deduplicate {
        hash.unique_candidate_pairs()
    } else {
        hash.candidate_pairs()
    };

    let pairs: Vec<CollisionPair> = candidates
        .into_iter()
        .filter_map(|(first, second)| {
            let result = test_intersection(&boxes[first], &boxes[second]);
            result.is_colliding.then_some(CollisionPair {
                first,
                second,
                result,
            })
        })
        .collect();

    debug!(
        objects = items.len(),
        buckets = hash.bucket_count(),
        colliding = pairs.len(),
        "Broad phase complete"
    );
    pairs
}

/// Surface gap between two boxes along the line joining their centres.
///
/// Negative when the projections overlap. Coincident centres measure along
/// world x.
#[must_use]
pub fn separation_distance(a: &Obb, b: &Obb) -> f64 {
    let delta = b.center - a.center;
    let mut direction = delta.normalize_or_zero();
    if direction == Vector3::zeros() {
        direction = Vector3::x();
    }
    delta.norm() - a.projected_radius(&direction) - b.projected_radius(&direction)
}
