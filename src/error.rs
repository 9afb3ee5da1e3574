use thiserror::Error;

/// Errors raised when constructing primitives or requesting meshes.
///
/// Queries on an already-constructed primitive never fail; numeric
/// degeneracies are resolved in place and misses are reported with
/// NaN sentinel points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A primitive parameter violates its geometric invariant.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A request parameter (segment count, scale factor) is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
