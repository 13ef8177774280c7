//! Tooth scene nodes and surface access.
//!
//! A [`ToothNode`] is a caller-owned snapshot of one tooth: its base pose,
//! local bounds and (optionally) surface vertices. Nothing here reaches into
//! a scene graph; the host copies what the algorithms need into these types.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::{Aabb, RigidTransform, ToothId, ToothState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Access to a sampled mesh surface.
///
/// Implemented for [`ToothMesh`] and for plain point slices so contact
/// estimation can run on any vertex buffer.
pub trait MeshSurface {
    /// All surface sample points.
    fn surface_points(&self) -> &[Point3<f64>];

    /// Surface points within `radius` of `center` (inclusive).
    fn points_within(&self, center: &Point3<f64>, radius: f64) -> Vec<Point3<f64>> {
        let radius_sq = radius * radius;
        self.surface_points()
            .iter()
            .filter(|p| (*p - center).norm_squared() <= radius_sq)
            .copied()
            .collect()
    }
}

impl MeshSurface for [Point3<f64>] {
    fn surface_points(&self) -> &[Point3<f64>] {
        self
    }
}

impl MeshSurface for Vec<Point3<f64>> {
    fn surface_points(&self) -> &[Point3<f64>] {
        self
    }
}

/// A tooth surface given as a vertex buffer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToothMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
}

impl ToothMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Creates a mesh from vertex positions.
    #[must_use]
    pub const fn from_points(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    /// Samples the surface of a box centred at the origin.
    ///
    /// Generates the boundary points of a `(divisions + 1)^3` lattice, so
    /// every face carries an evenly spaced grid of vertices.
    ///
    /// # Example
    ///
    /// ```
    /// use dental_types::{ToothMesh, Vector3};
    ///
    /// let mesh = ToothMesh::box_surface(Vector3::new(1.0, 1.0, 1.0), 2);
    /// // 27 lattice points minus the single interior point
    /// assert_eq!(mesh.len(), 26);
    /// ```
    #[must_use]
    pub fn box_surface(half_extents: Vector3<f64>, divisions: usize) -> Self {
        let n = divisions.max(1);
        #[allow(clippy::cast_precision_loss)]
        let step = |i: usize, h: f64| -h + 2.0 * h * (i as f64) / (n as f64);

        let mut vertices = Vec::new();
        for i in 0..=n {
            for j in 0..=n {
                for k in 0..=n {
                    let on_surface =
                        i == 0 || i == n || j == 0 || j == n || k == 0 || k == n;
                    if on_surface {
                        vertices.push(Point3::new(
                            step(i, half_extents.x),
                            step(j, half_extents.y),
                            step(k, half_extents.z),
                        ));
                    }
                }
            }
        }
        Self { vertices }
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounds of the vertices (empty for an empty mesh).
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

impl MeshSurface for ToothMesh {
    fn surface_points(&self) -> &[Point3<f64>] {
        &self.vertices
    }
}

/// A tooth in the virtual arch.
///
/// The world placement of a tooth is its `base_pose` with the tooth's
/// [`ToothState`] deltas applied: state rotation and scale act in the
/// tooth's local frame, the state offset is added in world space.
///
/// A node without bounds is valid; collision code treats it as a
/// near-zero-extent box at the node's position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToothNode {
    /// Tooth-position identifier.
    pub id: ToothId,
    /// Base world transform of the tooth before editing deltas.
    pub base_pose: RigidTransform,
    /// Local-space bounds of the tooth geometry.
    pub local_bounds: Option<Aabb>,
    /// Local-space surface vertices, when available.
    pub mesh: Option<ToothMesh>,
}

impl ToothNode {
    /// Creates a node at the origin with no geometry.
    #[must_use]
    pub fn new(id: ToothId) -> Self {
        Self {
            id,
            base_pose: RigidTransform::identity(),
            local_bounds: None,
            mesh: None,
        }
    }

    /// A box-shaped tooth centred at `center` with a sampled surface.
    #[must_use]
    pub fn box_shaped(id: ToothId, center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self::new(id)
            .with_position(center)
            .with_mesh(ToothMesh::box_surface(half_extents, 4))
    }

    /// Sets the base pose.
    #[must_use]
    pub const fn with_pose(mut self, pose: RigidTransform) -> Self {
        self.base_pose = pose;
        self
    }

    /// Sets the base translation.
    #[must_use]
    pub fn with_position(mut self, position: Point3<f64>) -> Self {
        self.base_pose.translation = position.coords;
        self
    }

    /// Sets the base rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.base_pose.rotation = rotation;
        self
    }

    /// Sets the local bounds.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.local_bounds = Some(bounds);
        self
    }

    /// Sets the surface mesh. Bounds are derived from it unless already set.
    #[must_use]
    pub fn with_mesh(mut self, mesh: ToothMesh) -> Self {
        if self.local_bounds.is_none() && !mesh.is_empty() {
            self.local_bounds = Some(mesh.bounds());
        }
        self.mesh = Some(mesh);
        self
    }

    /// Applies a correction on top of the existing base pose.
    pub fn apply_transform(&mut self, correction: &RigidTransform) {
        self.base_pose = self.base_pose.then(correction);
    }

    /// World rotation including the state's local rotation.
    #[must_use]
    pub fn world_rotation(&self, state: Option<&ToothState>) -> UnitQuaternion<f64> {
        state.map_or(self.base_pose.rotation, |s| {
            self.base_pose.rotation * s.rotation_quaternion()
        })
    }

    /// Per-axis world scale.
    #[must_use]
    pub fn world_scale(&self, state: Option<&ToothState>) -> Vector3<f64> {
        let base = Vector3::repeat(self.base_pose.scale);
        state.map_or(base, |s| base.component_mul(&s.scale))
    }

    /// World position of the node origin.
    #[must_use]
    pub fn world_position(&self, state: Option<&ToothState>) -> Point3<f64> {
        let offset = state.map_or_else(Vector3::zeros, |s| s.position_offset);
        Point3::from(self.base_pose.translation + offset)
    }

    /// Maps a local-space point to world space.
    #[must_use]
    pub fn local_to_world(&self, point: &Point3<f64>, state: Option<&ToothState>) -> Point3<f64> {
        let scaled = point.coords.component_mul(&self.world_scale(state));
        self.world_position(state) + self.world_rotation(state) * scaled
    }

    /// World-space centre of the tooth geometry (node origin when there is no geometry).
    #[must_use]
    pub fn world_center(&self, state: Option<&ToothState>) -> Point3<f64> {
        match self.local_bounds {
            Some(bounds) if !bounds.is_empty() => self.local_to_world(&bounds.center(), state),
            _ => self.world_position(state),
        }
    }

    /// The world transform ignoring non-uniform state scale.
    #[must_use]
    pub fn world_transform(&self, state: Option<&ToothState>) -> RigidTransform {
        RigidTransform::with_scale(
            self.world_rotation(state),
            self.world_position(state).coords,
            self.base_pose.scale,
        )
    }

    /// Surface vertices mapped to world space, if the node has a mesh.
    #[must_use]
    pub fn world_surface(&self, state: Option<&ToothState>) -> Option<ToothMesh> {
        self.mesh.as_ref().map(|mesh| {
            ToothMesh::from_points(
                mesh.vertices
                    .iter()
                    .map(|v| self.local_to_world(v, state))
                    .collect(),
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{Side, ToothClass};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn central_left() -> ToothId {
        ToothId::new(ToothClass::Central, Side::Left)
    }

    #[test]
    fn test_box_shaped_bounds_from_mesh() {
        let node = ToothNode::box_shaped(central_left(), Point3::new(4.0, 0.0, 0.0), Vector3::new(4.0, 5.0, 3.0));
        let bounds = node.local_bounds.unwrap();
        assert_relative_eq!(bounds.half_extents(), Vector3::new(4.0, 5.0, 3.0), epsilon = 1e-12);
        assert_eq!(node.world_center(None), Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_state_offset_moves_world_position() {
        let node = ToothNode::new(central_left()).with_position(Point3::new(1.0, 2.0, 3.0));
        let state = ToothState::new().with_offset(Vector3::new(0.5, 0.0, -1.0));
        assert_eq!(node.world_position(Some(&state)), Point3::new(1.5, 2.0, 2.0));
        assert_eq!(node.world_position(None), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_local_to_world_applies_scale_then_rotation() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
        let node = ToothNode::new(central_left()).with_rotation(rotation);
        let state = ToothState::new().with_scale(Vector3::new(2.0, 1.0, 1.0));

        let p = node.local_to_world(&Point3::new(1.0, 0.0, 0.0), Some(&state));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_world_surface_follows_state() {
        let node = ToothNode::box_shaped(central_left(), Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let state = ToothState::new().with_offset(Vector3::new(10.0, 0.0, 0.0));
        let surface = node.world_surface(Some(&state)).unwrap();
        let bounds = surface.bounds();
        assert_relative_eq!(bounds.min.x, 9.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.x, 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_transform_accumulates() {
        let mut node = ToothNode::new(central_left()).with_position(Point3::new(1.0, 0.0, 0.0));
        let correction = RigidTransform::from_translation(Vector3::new(0.0, 1.0, 0.0));
        node.apply_transform(&correction);
        node.apply_transform(&correction);
        assert_eq!(node.world_position(None), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_points_within_radius() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let near = points.points_within(&Point3::origin(), 1.0);
        assert_eq!(near.len(), 2);
    }

    #[test]
    fn test_node_without_geometry_center() {
        let node = ToothNode::new(central_left()).with_position(Point3::new(5.0, 0.0, 0.0));
        assert!(node.local_bounds.is_none());
        assert!(node.world_surface(None).is_none());
        assert_eq!(node.world_center(None), Point3::new(5.0, 0.0, 0.0));
    }
}
