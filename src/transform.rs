//! Rigid placement of a primitive's local frame in the global frame.
//!
//! A primitive is defined in its own object frame (axis along local z,
//! centred on the origin). A [`Placement`] maps that frame into the world:
//!
//! ```text
//! global = rotation * local + origin
//! local  = rotation^T * (global - origin)
//! ```

use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Point3, Vector3, ORTHO_TOL};

/// Translation + orthonormal rotation of a local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    origin: Point3,
    rotation: Matrix3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            rotation: Matrix3::identity(),
        }
    }
}

impl Placement {
    /// Create a placement, rejecting rotations that are not orthonormal.
    pub fn new(origin: Point3, rotation: Matrix3) -> Result<Self> {
        if !origin.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "placement origin must be finite, got {origin}"
            )));
        }
        if !rotation.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::InvalidGeometry(
                "rotation matrix has non-finite entries".into(),
            ));
        }
        let deviation = (rotation.transpose() * rotation - Matrix3::identity()).norm();
        if deviation > ORTHO_TOL {
            return Err(GeometryError::InvalidGeometry(format!(
                "rotation matrix is not orthonormal (|R^T R - I| = {deviation:e})"
            )));
        }
        Ok(Self { origin, rotation })
    }

    /// Pure translation.
    pub fn translation(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::new(Point3::new(x, y, z), Matrix3::identity())
    }

    /// Rotation by `angle` radians about `axis`, then translation to `origin`.
    ///
    /// The axis need not be unit length but must be finite and non-zero.
    pub fn from_axis_angle(origin: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        if !angle.is_finite() || !axis.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "rotation axis and angle must be finite, got axis {axis}, angle {angle}"
            )));
        }
        let axis = nalgebra::Unit::try_new(axis, f64::EPSILON).ok_or_else(|| {
            GeometryError::InvalidGeometry("rotation axis has zero length".into())
        })?;
        let rotation = nalgebra::Rotation3::from_axis_angle(&axis, angle);
        Self::new(origin, *rotation.matrix())
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn rotation(&self) -> &Matrix3 {
        &self.rotation
    }

    /// Global point -> local point.
    pub fn to_local(&self, p: &Point3) -> Point3 {
        Point3::from(self.rotation.transpose() * (p - self.origin))
    }

    /// Local point -> global point.
    pub fn to_global(&self, p: &Point3) -> Point3 {
        Point3::from(self.rotation * p.coords + self.origin.coords)
    }

    /// Rotate a direction into the local frame (no translation).
    pub fn vector_to_local(&self, v: &Vector3) -> Vector3 {
        self.rotation.transpose() * v
    }

    /// Rotate a direction into the global frame (no translation).
    pub fn vector_to_global(&self, v: &Vector3) -> Vector3 {
        self.rotation * v
    }

    /// Transform a line into the local frame.
    ///
    /// The direction is rotated but keeps its length; it is not renormalised.
    pub fn line_to_local(&self, line: &Line) -> Line {
        Line {
            origin: self.to_local(&line.origin),
            direction: self.vector_to_local(&line.direction),
        }
    }

    /// Transform a line into the global frame.
    pub fn line_to_global(&self, line: &Line) -> Line {
        Line {
            origin: self.to_global(&line.origin),
            direction: self.vector_to_global(&line.direction),
        }
    }
}

/// An infinite line `origin + λ * direction`.
///
/// The direction need not be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Line {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `lambda`.
    pub fn at(&self, lambda: f64) -> Point3 {
        self.origin + self.direction * lambda
    }
}
