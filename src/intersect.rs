//! Closed-form line–mantle intersection.
//!
//! In the mantle's local frame the (infinite, double) cone satisfies
//!
//! ```text
//! x² + y² = (r0 + S·z)²        r0 = radius at z = 0, S = dr/dz
//! ```
//!
//! Substituting `p = L + λ·D` gives `a·λ² + 2b·λ + c = 0` with
//!
//! ```text
//! k = r0 + S·L3
//! a = D1² + D2² - S²·D3²
//! b = L1·D1 + L2·D2 - S·D3·k
//! c = L1² + L2² - k²
//! ```
//!
//! Cylinders are the `S = 0` case. Results are not clipped to the finite
//! height or angular range; use [`ConeMantle::contains`] for that.

use rayon::prelude::*;

use crate::math::{nan_point, Point3, COEFF_TOL};
use crate::primitive::ConeMantle;
use crate::transform::Line;

struct Quadratic {
    a: f64,
    b: f64,
    c: f64,
    // Magnitudes of the summed terms, for relative zero tests.
    a_scale: f64,
    b_scale: f64,
    c_scale: f64,
}

fn coefficients(mantle: &ConeMantle, local: &Line) -> Quadratic {
    let s = mantle.slope();
    let r0 = mantle.radius_at_height(0.0);
    let (l, d) = (local.origin, local.direction);
    let k = r0 + s * l.z;
    let radial = d.x * d.x + d.y * d.y;
    let axial = s * s * d.z * d.z;
    Quadratic {
        a: radial - axial,
        b: l.x * d.x + l.y * d.y - s * d.z * k,
        c: l.x * l.x + l.y * l.y - k * k,
        a_scale: radial + axial,
        b_scale: (l.x * d.x).abs() + (l.y * d.y).abs() + (s * d.z * k).abs(),
        c_scale: l.x * l.x + l.y * l.y + k * k,
    }
}

/// Intersect `line` with the mantle surface.
///
/// Always returns two global points:
/// - two crossings: both points, in no particular order;
/// - tangent line, or a direction along the asymptotic cone (single
///   crossing): the same point twice;
/// - line lying on the surface: the line origin twice;
/// - no crossing: two NaN points (see [`crate::math::is_sentinel`]).
pub fn intersection(mantle: &ConeMantle, line: &Line) -> (Point3, Point3) {
    let placement = mantle.placement();
    let local = placement.line_to_local(line);
    let q = coefficients(mantle, &local);

    if q.a.abs() <= COEFF_TOL * q.a_scale {
        if q.b.abs() > COEFF_TOL * q.b_scale {
            log::trace!("linear intersection case (a = {:e})", q.a);
            let p = placement.to_global(&local.at(-q.c / (2.0 * q.b)));
            return (p, p);
        }
        if q.c.abs() <= COEFF_TOL * q.c_scale {
            log::trace!("line lies on the mantle surface");
            return (line.origin, line.origin);
        }
        log::trace!("line parallel to the mantle without touching it");
        return (nan_point(), nan_point());
    }

    let disc = q.b * q.b - q.a * q.c;
    let disc_scale = (q.b * q.b).abs() + (q.a * q.c).abs();
    let root = if disc >= 0.0 {
        disc.sqrt()
    } else if -disc <= COEFF_TOL * disc_scale {
        0.0
    } else {
        log::trace!("negative discriminant {disc:e}, no intersection");
        return (nan_point(), nan_point());
    };

    let l1 = (-q.b + root) / q.a;
    let l2 = (-q.b - root) / q.a;
    (
        placement.to_global(&local.at(l1)),
        placement.to_global(&local.at(l2)),
    )
}

/// Unchecked variant of [`intersection`].
///
/// Takes `sqrt(|disc|)` instead of testing the discriminant's sign, so it
/// returns two finite (but meaningless) points for lines that miss. A zero
/// leading coefficient is still solved as the linear case.
pub fn intersection_raw(mantle: &ConeMantle, line: &Line) -> (Point3, Point3) {
    let placement = mantle.placement();
    let local = placement.line_to_local(line);
    let q = coefficients(mantle, &local);

    if q.a == 0.0 {
        let p = placement.to_global(&local.at(-q.c / (2.0 * q.b)));
        return (p, p);
    }
    let root = (q.b * q.b - q.a * q.c).abs().sqrt();
    (
        placement.to_global(&local.at((-q.b + root) / q.a)),
        placement.to_global(&local.at((-q.b - root) / q.a)),
    )
}

/// Intersect many lines with one mantle in parallel. Output order matches
/// `lines`.
pub fn intersect_all(mantle: &ConeMantle, lines: &[Line]) -> Vec<(Point3, Point3)> {
    lines
        .par_iter()
        .map(|line| intersection(mantle, line))
        .collect()
}
