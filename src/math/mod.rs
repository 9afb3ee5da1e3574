//! Linear algebra type aliases and geometric tolerances.

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Tolerance for accepting a rotation matrix as orthonormal.
pub const ORTHO_TOL: f64 = 1e-9;

/// Relative tolerance under which a quadratic coefficient is treated as zero.
pub const COEFF_TOL: f64 = 1e-12;

/// Default tolerance for on-surface tests (distance in model units).
pub const CSG_TOL: f64 = 1e-9;

/// A point with all coordinates NaN, used to signal a missing intersection.
pub fn nan_point() -> Point3 {
    Point3::new(f64::NAN, f64::NAN, f64::NAN)
}

/// True if `p` is the NaN sentinel produced by [`nan_point`].
pub fn is_sentinel(p: &Point3) -> bool {
    p.coords.iter().all(|c| c.is_nan())
}
