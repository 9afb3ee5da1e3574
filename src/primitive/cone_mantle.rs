//! Cone mantle: the lateral surface of a cylinder or a frustum.
//!
//! In its local frame the mantle is centred on the origin with its axis
//! along z, spanning `z ∈ [-half_height, +half_height]`. The radius is
//! either constant (cylinder) or varies linearly from `bottom` at
//! `z = -half_height` to `top` at `z = +half_height` (frustum, or a
//! pointed cone when one radius is zero).

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};
use crate::mesh::{band_quads, ring_edges, vertical_line_indices, Meshable};
use crate::transform::Placement;

/// Radius profile of a mantle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    /// Cylinder of fixed radius.
    Constant(f64),
    /// Linear profile between the bottom and top rims.
    Varying { bottom: f64, top: f64 },
}

/// Angular extent of a mantle, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AngularRange {
    /// Full revolution `[0, 2π]`.
    #[default]
    Full,
    /// Partial mantle `[min, max]` with `min < max`.
    Partial { min: f64, max: f64 },
}

/// Which side of a frustum mantle its normal points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalDirection {
    Inward,
    #[default]
    Outward,
}

/// The side surface of a right circular cone, frustum or cylinder.
///
/// Immutable once constructed; every query is a pure function of the
/// stored parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeMantle {
    radius: Radius,
    half_height: f64,
    angular: AngularRange,
    placement: Placement,
    normal_direction: NormalDirection,
}

impl ConeMantle {
    /// Full, outward-facing mantle at the global origin.
    pub fn new(radius: Radius, half_height: f64) -> Result<Self> {
        validate_radius(&radius)?;
        if !half_height.is_finite() || half_height < 0.0 {
            return Err(GeometryError::InvalidGeometry(format!(
                "half height must be finite and >= 0, got {half_height}"
            )));
        }
        Ok(Self {
            radius,
            half_height,
            angular: AngularRange::Full,
            placement: Placement::default(),
            normal_direction: NormalDirection::Outward,
        })
    }

    pub fn cylinder(radius: f64, half_height: f64) -> Result<Self> {
        Self::new(Radius::Constant(radius), half_height)
    }

    pub fn frustum(bottom: f64, top: f64, half_height: f64) -> Result<Self> {
        Self::new(Radius::Varying { bottom, top }, half_height)
    }

    /// Restrict the mantle to `[min, max]` radians.
    pub fn with_angular_range(mut self, min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(GeometryError::InvalidGeometry(format!(
                "angular range must satisfy min < max, got [{min}, {max}]"
            )));
        }
        self.angular = AngularRange::Partial { min, max };
        Ok(self)
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_normal_direction(mut self, normal_direction: NormalDirection) -> Self {
        self.normal_direction = normal_direction;
        self
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn angular_range(&self) -> AngularRange {
        self.angular
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn normal_direction(&self) -> NormalDirection {
        self.normal_direction
    }

    pub fn is_full(&self) -> bool {
        matches!(self.angular, AngularRange::Full)
    }

    /// Radius at local height `z`.
    ///
    /// Linear in `z`; a zero-height frustum returns its bottom radius.
    pub fn radius_at_height(&self, z: f64) -> f64 {
        match self.radius {
            Radius::Constant(r) => r,
            Radius::Varying { bottom, .. } if self.half_height == 0.0 => bottom,
            Radius::Varying { bottom, top } => {
                bottom + (self.half_height + z) * (top - bottom) / (2.0 * self.half_height)
            }
        }
    }

    /// dr/dz of the generating line. Zero for cylinders and flat frustums.
    pub fn slope(&self) -> f64 {
        match self.radius {
            Radius::Constant(_) => 0.0,
            Radius::Varying { .. } if self.half_height == 0.0 => 0.0,
            Radius::Varying { bottom, top } => (top - bottom) / (2.0 * self.half_height),
        }
    }

    /// `(φ_min, φ_max)`; `(0, 2π)` for a full mantle.
    pub fn angular_limits(&self) -> (f64, f64) {
        match self.angular {
            AngularRange::Full => (0.0, TAU),
            AngularRange::Partial { min, max } => (min, max),
        }
    }

    /// Surface normal at `point` (global frame).
    ///
    /// Cylinders get the outward radial direction. Frustums get
    /// `±(cos φ, sin φ, -dr/dz)` depending on [`NormalDirection`], which is
    /// not unit length unless the slope is zero. Use [`Self::unit_normal`]
    /// when a unit vector is needed.
    pub fn normal(&self, point: &Point3) -> Vector3 {
        let local = self.placement.to_local(point);
        let phi = local.y.atan2(local.x);
        let (s, c) = phi.sin_cos();
        let n = match (self.radius, self.normal_direction) {
            (Radius::Constant(_), _) => Vector3::new(c, s, 0.0),
            (Radius::Varying { .. }, NormalDirection::Outward) => {
                Vector3::new(c, s, -self.slope())
            }
            (Radius::Varying { .. }, NormalDirection::Inward) => {
                Vector3::new(-c, -s, self.slope())
            }
        };
        self.placement.vector_to_global(&n)
    }

    pub fn unit_normal(&self, point: &Point3) -> Vector3 {
        self.normal(point).normalize()
    }

    /// True if `point` lies on the finite mantle within `tol`.
    pub fn contains(&self, point: &Point3, tol: f64) -> bool {
        let local = self.placement.to_local(point);
        if local.z.abs() > self.half_height + tol {
            return false;
        }
        let rho = local.x.hypot(local.y);
        if (rho - self.radius_at_height(local.z)).abs() > tol {
            return false;
        }
        match self.angular {
            AngularRange::Full => true,
            // The angle is undefined on the axis.
            _ if rho <= tol => true,
            AngularRange::Partial { min, max } => {
                let angle_tol = tol / rho;
                let phi = min + (local.y.atan2(local.x) - min).rem_euclid(TAU);
                phi <= max + angle_tol || phi >= min + TAU - angle_tol
            }
        }
    }

    /// Points on the mantle at angles `φ_min + k·Δφ` and local height `z`.
    pub fn ring(&self, z: f64, angular_segments: usize) -> Vec<Point3> {
        let (min, max) = self.angular_limits();
        let r = self.radius_at_height(z);
        let step = (max - min) / angular_segments.max(1) as f64;
        (0..=angular_segments)
            .map(|k| {
                let (s, c) = (min + k as f64 * step).sin_cos();
                self.placement.to_global(&Point3::new(r * c, r * s, z))
            })
            .collect()
    }

    /// A grid of surface points: `height_steps + 1` rings of
    /// `angular_segments + 1` points each, bottom ring first.
    pub fn sample(&self, angular_segments: usize, height_steps: usize) -> Result<Vec<Point3>> {
        if angular_segments == 0 || height_steps == 0 {
            return Err(GeometryError::InvalidArgument(format!(
                "sampling needs at least one segment per direction, got {angular_segments}x{height_steps}"
            )));
        }
        let dz = 2.0 * self.half_height / height_steps as f64;
        Ok((0..=height_steps)
            .flat_map(|j| self.ring(-self.half_height + j as f64 * dz, angular_segments))
            .collect())
    }
}

fn validate_radius(radius: &Radius) -> Result<()> {
    let ok = |r: f64| r.is_finite() && r >= 0.0;
    let valid = match *radius {
        Radius::Constant(r) => ok(r),
        Radius::Varying { bottom, top } => ok(bottom) && ok(top),
    };
    if valid {
        Ok(())
    } else {
        Err(GeometryError::InvalidGeometry(format!(
            "radii must be finite and >= 0, got {radius:?}"
        )))
    }
}

impl Meshable for ConeMantle {
    /// Bottom rim followed by top rim, `angular_segments + 1` points each.
    fn vertices(&self, angular_segments: usize) -> Vec<Point3> {
        let mut verts = self.ring(-self.half_height, angular_segments);
        verts.extend(self.ring(self.half_height, angular_segments));
        verts
    }

    fn connections(&self, angular_segments: usize) -> Vec<[usize; 4]> {
        band_quads(0, angular_segments)
    }

    fn wire_connections(&self, angular_segments: usize, vertical_lines: usize) -> Vec<[usize; 2]> {
        let n = angular_segments;
        let mut edges: Vec<[usize; 2]> = vertical_line_indices(n, vertical_lines, self.is_full())
            .into_iter()
            .map(|i| [i, i + n + 1])
            .collect();
        edges.extend(ring_edges(0, n));
        edges.extend(ring_edges(n + 1, n));
        edges
    }

    fn surface_normal(&self, point: &Point3) -> Vector3 {
        self.unit_normal(point)
    }
}
