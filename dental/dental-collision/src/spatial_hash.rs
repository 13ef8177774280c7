//! Uniform spatial hash for broad-phase candidate generation.
//!
//! Each object is inserted into its own cell and the 26 cells around it, so
//! two objects in neighbouring cells always share at least one bucket.

use dental_types::Point3;
use hashbrown::HashMap;

use crate::CollisionError;

/// Default cell size in millimetres, about two tooth widths.
pub const DEFAULT_CELL_SIZE: f64 = 20.0;

/// Integer cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoord {
    /// X cell index.
    pub x: i32,
    /// Y cell index.
    pub y: i32,
    /// Z cell index.
    pub z: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// This cell and its 26 neighbours.
    pub fn with_neighbors(self) -> impl Iterator<Item = Self> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                (-1..=1).map(move |dz| {
                    Self::new(
                        self.x.saturating_add(dx),
                        self.y.saturating_add(dy),
                        self.z.saturating_add(dz),
                    )
                })
            })
        })
    }
}

/// Buckets object indices by world position.
///
/// # Example
///
/// ```
/// use dental_collision::SpatialHash;
/// use nalgebra::Point3;
///
/// let mut hash = SpatialHash::new(20.0);
/// hash.insert_with_neighbors(0, &Point3::new(1.0, 0.0, 0.0));
/// hash.insert_with_neighbors(1, &Point3::new(25.0, 0.0, 0.0));
/// hash.insert_with_neighbors(2, &Point3::new(90.0, 0.0, 0.0));
///
/// let pairs = hash.candidate_pairs();
/// assert!(pairs.contains(&(0, 1)));
/// assert!(!pairs.contains(&(0, 2)));
/// ```
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f64,
    inv_cell_size: f64,
    buckets: HashMap<CellCoord, Vec<usize>>,
    objects: usize,
}

impl SpatialHash {
    /// Creates an empty hash.
    ///
    /// A negative size uses its magnitude and zero becomes `f64::EPSILON`.
    /// Non-finite sizes fall back to [`DEFAULT_CELL_SIZE`]. Use
    /// [`SpatialHash::try_new`] to reject all of these instead.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.abs().max(f64::EPSILON)
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            buckets: HashMap::new(),
            objects: 0,
        }
    }

    /// Creates an empty hash, rejecting an invalid cell size.
    ///
    /// # Errors
    ///
    /// Returns [`CollisionError::InvalidCellSize`] if `cell_size` is not
    /// positive and finite.
    pub fn try_new(cell_size: f64) -> Result<Self, CollisionError> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(CollisionError::InvalidCellSize(cell_size));
        }
        Ok(Self::new(cell_size))
    }

    /// Cell edge length.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The cell containing `point`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_of(&self, point: &Point3<f64>) -> CellCoord {
        // Truncation is the point: continuous coords map to discrete cells
        CellCoord::new(
            (point.x * self.inv_cell_size).floor() as i32,
            (point.y * self.inv_cell_size).floor() as i32,
            (point.z * self.inv_cell_size).floor() as i32,
        )
    }

    /// Inserts `index` into the cell at `position` and all 26 neighbours.
    pub fn insert_with_neighbors(&mut self, index: usize, position: &Point3<f64>) {
        for cell in self.cell_of(position).with_neighbors() {
            self.buckets.entry(cell).or_default().push(index);
        }
        self.objects += 1;
    }

    /// Every pair of indices that share a bucket, as `(low, high)`.
    ///
    /// A pair appears once per bucket it shares, so nearby objects are
    /// reported many times. Order follows bucket iteration and is not
    /// stable.
    #[must_use]
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for members in self.buckets.values() {
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    if a != b {
                        pairs.push((a.min(b), a.max(b)));
                    }
                }
            }
        }
        pairs
    }

    /// Candidate pairs with duplicates removed, sorted.
    #[must_use]
    pub fn unique_candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = self.candidate_pairs();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// Number of inserted objects.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.objects
    }

    /// Returns `true` if nothing has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.objects == 0
    }

    /// Number of non-empty buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all objects, keeping the cell size.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.objects = 0;
    }
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}
