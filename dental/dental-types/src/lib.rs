//! Core types for smile design geometry.
//!
//! This crate provides the foundational types shared by the alignment,
//! collision, contact and validation crates:
//!
//! - [`RigidTransform`] - Rotation, translation and uniform scale
//! - [`VectorExt`] - Total vector helpers (zero-safe normalization)
//! - [`Aabb`] - Local axis-aligned bounds of a tooth's geometry
//! - [`ToothId`] - Clinical tooth-position identifier (`central_L`, `canine_R`, ...)
//! - [`ToothState`] - Position, rotation and scale deltas plus a lock flag
//! - [`ToothNode`] - A tooth's base pose, bounds and optional surface mesh
//! - [`Landmarks`] - Named facial landmark points
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no UI or rendering dependencies. Every
//! function operates on plain snapshots handed in by the caller.
//!
//! # Units
//!
//! All coordinates are `f64` millimetres.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** viewed from the front of the face:
//! - X: horizontal (patient right is negative X, the viewer's left)
//! - Y: vertical (incisal to gingival)
//! - Z: depth (labial surfaces face +Z)
//!
//! # Example
//!
//! ```
//! use dental_types::{ToothId, ToothNode, ToothState, Point3, Vector3};
//!
//! let id: ToothId = "central_L".parse().unwrap();
//! let node = ToothNode::box_shaped(id, Point3::new(4.0, 0.0, 0.0), Vector3::new(4.0, 5.0, 3.0));
//!
//! let mut state = ToothState::default();
//! state.translate(Vector3::new(0.5, 0.0, 0.0));
//!
//! let position = node.world_position(Some(&state));
//! assert!((position.x - 4.5).abs() < 1e-12);
//! assert_eq!(id.counterpart().to_string(), "central_R");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bounds;
mod error;
mod landmarks;
mod node;
mod state;
mod tooth;
mod transform;
mod vector;

pub use bounds::Aabb;
pub use error::{TypesError, TypesResult};
pub use landmarks::Landmarks;
pub use node::{MeshSurface, ToothMesh, ToothNode};
pub use state::ToothState;
pub use tooth::{ARCH_SEQUENCE, Side, ToothClass, ToothId};
pub use transform::RigidTransform;
pub use vector::{VectorExt, centroid};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, UnitQuaternion, Vector3};
