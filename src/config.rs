//! Serde data model for primitive parameters.
//!
//! Detector descriptions hand primitives over as plain parameter records.
//! [`ConeMantleConfig`] is that record for a cone mantle; converting it
//! with `ConeMantle::try_from` applies the same validation as the
//! constructors. Any serde format can drive it, e.g. JSON:
//!
//! ```json
//! { "radius": [1.0, 3.0], "half_height": 5.0, "phi": [0.0, 3.14159],
//!   "origin": [0.0, 0.0, 10.0], "normal": "inward" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Point3};
use crate::primitive::{AngularRange, ConeMantle, NormalDirection, Radius};
use crate::transform::Placement;

/// Either a single radius or a `[bottom, top]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RadiusConfig {
    Constant(f64),
    Varying([f64; 2]),
}

/// Parameters of a cone mantle as found in a detector description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeMantleConfig {
    pub radius: RadiusConfig,
    pub half_height: f64,
    /// Angular range `[min, max]` in radians; absent for a full mantle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<[f64; 2]>,
    #[serde(default)]
    pub origin: [f64; 3],
    /// Row-major rotation matrix; absent for identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[[f64; 3]; 3]>,
    #[serde(default)]
    pub normal: NormalDirection,
}

impl TryFrom<ConeMantleConfig> for ConeMantle {
    type Error = GeometryError;

    fn try_from(cfg: ConeMantleConfig) -> Result<Self> {
        let radius = match cfg.radius {
            RadiusConfig::Constant(r) => Radius::Constant(r),
            RadiusConfig::Varying([bottom, top]) => Radius::Varying { bottom, top },
        };
        let rotation = match cfg.rotation {
            Some(rows) => Matrix3::from_fn(|i, j| rows[i][j]),
            None => Matrix3::identity(),
        };
        let placement = Placement::new(Point3::from(cfg.origin), rotation)?;
        let mut mantle = ConeMantle::new(radius, cfg.half_height)?
            .with_placement(placement)
            .with_normal_direction(cfg.normal);
        if let Some([min, max]) = cfg.phi {
            mantle = mantle.with_angular_range(min, max)?;
        }
        Ok(mantle)
    }
}

impl From<&ConeMantle> for ConeMantleConfig {
    fn from(mantle: &ConeMantle) -> Self {
        let radius = match mantle.radius() {
            Radius::Constant(r) => RadiusConfig::Constant(r),
            Radius::Varying { bottom, top } => RadiusConfig::Varying([bottom, top]),
        };
        let phi = match mantle.angular_range() {
            AngularRange::Full => None,
            AngularRange::Partial { min, max } => Some([min, max]),
        };
        let placement = mantle.placement();
        let r = placement.rotation();
        let rotation = (*r != Matrix3::identity()).then(|| {
            [
                [r[(0, 0)], r[(0, 1)], r[(0, 2)]],
                [r[(1, 0)], r[(1, 1)], r[(1, 2)]],
                [r[(2, 0)], r[(2, 1)], r[(2, 2)]],
            ]
        });
        Self {
            radius,
            half_height: mantle.half_height(),
            phi,
            origin: placement.origin().coords.into(),
            rotation,
            normal: mantle.normal_direction(),
        }
    }
}
