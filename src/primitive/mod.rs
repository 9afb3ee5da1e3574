//! Curved surface primitives of the detector CSG model.
//!
//! Each primitive lives in its own local frame and carries a
//! [`Placement`](crate::transform::Placement) into the global frame.

mod cone_mantle;

pub use cone_mantle::{AngularRange, ConeMantle, NormalDirection, Radius};
