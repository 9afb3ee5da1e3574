//! Polygon meshes of curved surface primitives.
//!
//! A primitive implementing [`Meshable`] samples its surface into rings of
//! vertices and describes how they connect. [`Mesh`] packages the two for a
//! renderer, either as a quad shell or as a wireframe of edges.
//!
//! For `n` angular segments a two-ring primitive lays out its vertices as
//!
//! ```text
//! bottom: 0      1      ...  n
//! top:    n+1    n+2    ...  2n+1
//! ```
//!
//! and the shell quad for segment `i` is `[i, i+1, i+n+2, i+n+1]`.
//! Indices are 0-based.

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};
use crate::types::{MeshResolution, TriangleMesh};

/// A surface that can be sampled into a renderable mesh.
pub trait Meshable {
    /// Sampled surface vertices (global frame) for `angular_segments`.
    fn vertices(&self, angular_segments: usize) -> Vec<Point3>;

    /// Quad faces over [`Self::vertices`].
    fn connections(&self, angular_segments: usize) -> Vec<[usize; 4]>;

    /// Wireframe edges over [`Self::vertices`]: up to `vertical_lines`
    /// longitudinal lines plus the rim polylines.
    fn wire_connections(&self, angular_segments: usize, vertical_lines: usize) -> Vec<[usize; 2]>;

    /// Unit surface normal at a point on the surface.
    fn surface_normal(&self, point: &Point3) -> Vector3;
}

/// Index connectivity of a [`Mesh`].
#[derive(Debug, Clone, PartialEq)]
pub enum Connectivity {
    Quads(Vec<[usize; 4]>),
    Edges(Vec<[usize; 2]>),
}

impl Connectivity {
    pub fn len(&self) -> usize {
        match self {
            Connectivity::Quads(q) => q.len(),
            Connectivity::Edges(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every connection as an index slice.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &[usize]> + '_> {
        match self {
            Connectivity::Quads(q) => Box::new(q.iter().map(|c| c.as_slice())),
            Connectivity::Edges(e) => Box::new(e.iter().map(|c| c.as_slice())),
        }
    }
}

/// Vertex coordinate arrays plus connectivity, ready for a renderer.
///
/// `x`, `y` and `z` are parallel: vertex `i` is `(x[i], y[i], z[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub connectivity: Connectivity,
}

impl Mesh {
    /// Quad shell of `primitive` with `angular_segments` segments.
    pub fn shell<P: Meshable + ?Sized>(primitive: &P, angular_segments: usize) -> Result<Self> {
        check_segments(angular_segments)?;
        let mesh = Self::from_parts(
            &primitive.vertices(angular_segments),
            Connectivity::Quads(primitive.connections(angular_segments)),
        );
        log::debug!(
            "shell mesh: {} vertices, {} quads",
            mesh.vertex_count(),
            mesh.connectivity.len()
        );
        Ok(mesh)
    }

    /// Wireframe of `primitive`: rims plus `vertical_lines` longitudinal edges.
    pub fn wireframe<P: Meshable + ?Sized>(
        primitive: &P,
        angular_segments: usize,
        vertical_lines: usize,
    ) -> Result<Self> {
        check_segments(angular_segments)?;
        let mesh = Self::from_parts(
            &primitive.vertices(angular_segments),
            Connectivity::Edges(primitive.wire_connections(angular_segments, vertical_lines)),
        );
        log::debug!(
            "wireframe mesh: {} vertices, {} edges",
            mesh.vertex_count(),
            mesh.connectivity.len()
        );
        Ok(mesh)
    }

    fn from_parts(vertices: &[Point3], connectivity: Connectivity) -> Self {
        Self {
            x: vertices.iter().map(|p| p.x).collect(),
            y: vertices.iter().map(|p| p.y).collect(),
            z: vertices.iter().map(|p| p.z).collect(),
            connectivity,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(self.x[i], self.y[i], self.z[i])
    }

    /// Copy with every coordinate multiplied by a length-unit factor.
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "unit scale factor must be finite and > 0, got {factor}"
            )));
        }
        let scale = |v: &[f64]| -> Vec<f64> { v.iter().map(|c| c * factor).collect() };
        Ok(Self {
            x: scale(&self.x),
            y: scale(&self.y),
            z: scale(&self.z),
            connectivity: self.connectivity.clone(),
        })
    }
}

impl MeshResolution {
    pub fn shell<P: Meshable + ?Sized>(&self, primitive: &P) -> Result<Mesh> {
        Mesh::shell(primitive, self.angular_segments)
    }

    pub fn wireframe<P: Meshable + ?Sized>(&self, primitive: &P) -> Result<Mesh> {
        Mesh::wireframe(primitive, self.angular_segments, self.vertical_lines)
    }
}

/// Triangulate the quad shell of `primitive`, with unit normals taken from
/// the surface itself rather than from the facets.
pub fn triangulate<P: Meshable + ?Sized>(
    primitive: &P,
    angular_segments: usize,
) -> Result<TriangleMesh> {
    check_segments(angular_segments)?;
    let verts = primitive.vertices(angular_segments);
    let normals = verts
        .iter()
        .map(|p| primitive.surface_normal(p))
        .collect();
    let mut indices = Vec::with_capacity(6 * angular_segments);
    for [a, b, c, d] in primitive.connections(angular_segments) {
        indices.extend([a, b, c, a, c, d].map(|i| i as u32));
    }
    Ok(TriangleMesh {
        vertices: verts.iter().map(|p| p.coords).collect(),
        normals,
        indices,
    })
}

fn check_segments(angular_segments: usize) -> Result<()> {
    if angular_segments == 0 {
        return Err(GeometryError::InvalidArgument(
            "angular segment count must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Quads joining the ring starting at `start` (n+1 vertices) to the ring
/// directly after it.
pub fn band_quads(start: usize, n: usize) -> Vec<[usize; 4]> {
    (start..start + n)
        .map(|i| [i, i + 1, i + n + 2, i + n + 1])
        .collect()
}

/// Open polyline edges along a ring of `n + 1` vertices starting at `start`.
pub fn ring_edges(start: usize, n: usize) -> Vec<[usize; 2]> {
    (start..start + n).map(|i| [i, i + 1]).collect()
}

/// Evenly spaced ring positions for `requested` longitudinal lines.
///
/// A closed ring repeats its first vertex at position `n`, so only `n`
/// distinct positions exist; an open ring has `n + 1` including both ends.
pub fn vertical_line_indices(n: usize, requested: usize, closed: bool) -> Vec<usize> {
    let available = if closed { n } else { n + 1 };
    let count = requested.min(available);
    if count < requested {
        log::warn!("clamping {requested} vertical lines to {count}");
    }
    match count {
        0 => Vec::new(),
        _ if closed => (0..count).map(|k| k * n / count).collect(),
        1 => vec![0],
        _ => (0..count)
            .map(|k| ((k * n) as f64 / (count - 1) as f64).round() as usize)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_quads_match_ring_layout() {
        assert_eq!(band_quads(0, 2), vec![[0, 1, 4, 3], [1, 2, 5, 4]]);
    }

    #[test]
    fn ring_edges_are_open_polylines() {
        assert_eq!(ring_edges(4, 3), vec![[4, 5], [5, 6], [6, 7]]);
    }

    #[test]
    fn closed_ring_selection_is_distinct() {
        assert_eq!(vertical_line_indices(8, 4, true), vec![0, 2, 4, 6]);
        assert_eq!(vertical_line_indices(8, 20, true).len(), 8);
        assert!(vertical_line_indices(8, 0, true).is_empty());
    }

    #[test]
    fn open_ring_selection_includes_both_ends() {
        assert_eq!(vertical_line_indices(6, 3, false), vec![0, 3, 6]);
        assert_eq!(vertical_line_indices(6, 1, false), vec![0]);
        assert_eq!(vertical_line_indices(2, 9, false), vec![0, 1, 2]);
    }
}
