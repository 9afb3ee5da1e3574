use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A triangle mesh of a primitive's surface, for renderers that only take
/// triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    /// Ring samples in the global frame, same order as the quad shell.
    pub vertices: Vec<Vector3<f64>>,
    /// Surface normal at each sample, normalised and oriented by the
    /// primitive's normal direction.
    pub normals: Vec<Vector3<f64>>,
    /// Two triangles per shell quad, as index triples into `vertices`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Serialize the mesh into a compact binary buffer for a GPU renderer.
    ///
    /// Layout:
    /// ```text
    /// [nv: u32 LE]
    /// [vertices: f32*3*nv LE]
    /// [normals: f32*3*nv LE]
    /// [ni: u32 LE]
    /// [indices: u32*ni LE]
    /// ```
    pub fn to_binary(&self) -> Vec<u8> {
        let nv = self.vertices.len();
        let ni = self.indices.len();
        let mut buf = Vec::with_capacity(8 + 24 * nv + 4 * ni);

        buf.extend_from_slice(&(nv as u32).to_le_bytes());
        for v in self.vertices.iter().chain(&self.normals) {
            for c in [v.x, v.y, v.z] {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }

        buf.extend_from_slice(&(ni as u32).to_le_bytes());
        for &i in &self.indices {
            buf.extend_from_slice(&i.to_le_bytes());
        }

        buf
    }
}

/// Sampling resolution for visualising primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshResolution {
    /// Segments per rim.
    pub angular_segments: usize,
    /// Longitudinal lines drawn in wireframe mode.
    pub vertical_lines: usize,
}

impl Default for MeshResolution {
    fn default() -> Self {
        Self { angular_segments: 36, vertical_lines: 2 }
    }
}
