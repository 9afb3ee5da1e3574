//! Geometry core for solid-state detector models.
//!
//! Detector parts are described as constructive-solid-geometry primitives
//! placed in a global frame. This crate provides the pieces that need real
//! geometry work:
//!
//! - [`transform`]: rigid placement of a primitive's local frame.
//! - [`primitive`]: the cone mantle (cylinder or frustum side surface).
//! - [`intersect`]: closed-form line–mantle intersection.
//! - [`mesh`]: shell and wireframe meshes for rendering.
//! - [`config`]: serde data model for primitive parameters.

pub mod config;
pub mod error;
pub mod intersect;
pub mod math;
pub mod mesh;
pub mod primitive;
pub mod transform;
pub mod types;

pub use error::{GeometryError, Result};
pub use intersect::{intersect_all, intersection, intersection_raw};
pub use mesh::{triangulate, Connectivity, Mesh, Meshable};
pub use primitive::{AngularRange, ConeMantle, NormalDirection, Radius};
pub use transform::{Line, Placement};
