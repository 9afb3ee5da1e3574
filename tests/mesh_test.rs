use approx::assert_relative_eq;
use ssdgeom::math::{Point3, Vector3, CSG_TOL};
use ssdgeom::types::MeshResolution;
use ssdgeom::{triangulate, Connectivity, ConeMantle, GeometryError, Mesh, Meshable, Placement};

fn placed_frustum() -> ConeMantle {
    ConeMantle::frustum(1.0, 3.0, 5.0)
        .unwrap()
        .with_placement(Placement::from_axis_angle(
            Point3::new(2.0, -1.0, 4.0),
            Vector3::new(0.3, 1.0, 0.0),
            0.6,
        )
        .unwrap())
}

fn assert_indices_in_bounds(mesh: &Mesh, label: &str) {
    let nv = mesh.vertex_count();
    for conn in mesh.connectivity.iter() {
        for &i in conn {
            assert!(i < nv, "{label}: index {i} out of bounds (nv={nv})");
        }
    }
}

// ---------------------------------------------------------------------------
// Shell mode
// ---------------------------------------------------------------------------

#[test]
fn shell_counts() {
    let m = placed_frustum();
    for n in [1, 3, 16, 40] {
        let mesh = Mesh::shell(&m, n).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * (n + 1));
        assert_eq!(mesh.y.len(), mesh.x.len());
        assert_eq!(mesh.z.len(), mesh.x.len());
        match &mesh.connectivity {
            Connectivity::Quads(q) => assert_eq!(q.len(), n),
            other => panic!("expected quads, got {other:?}"),
        }
        assert_indices_in_bounds(&mesh, "shell");
    }
}

#[test]
fn shell_quads_join_bottom_and_top_rims() {
    let m = ConeMantle::frustum(1.0, 3.0, 5.0).unwrap();
    let n = 8;
    let mesh = Mesh::shell(&m, n).unwrap();
    let Connectivity::Quads(quads) = &mesh.connectivity else {
        panic!("expected quads");
    };
    for (i, quad) in quads.iter().enumerate() {
        assert_eq!(*quad, [i, i + 1, i + n + 2, i + n + 1]);
        assert_relative_eq!(mesh.z[quad[0]], -5.0);
        assert_relative_eq!(mesh.z[quad[1]], -5.0);
        assert_relative_eq!(mesh.z[quad[2]], 5.0);
        assert_relative_eq!(mesh.z[quad[3]], 5.0);
    }
}

#[test]
fn full_mantle_rim_closes_on_itself() {
    let m = placed_frustum();
    let n = 12;
    let mesh = Mesh::shell(&m, n).unwrap();
    assert_relative_eq!(mesh.vertex(0), mesh.vertex(n), epsilon = 1e-12);
    assert_relative_eq!(mesh.vertex(n + 1), mesh.vertex(2 * n + 1), epsilon = 1e-12);
}

#[test]
fn vertices_lie_on_the_rims() {
    let m = placed_frustum();
    for p in m.vertices(24) {
        assert!(m.contains(&p, CSG_TOL), "{p} is off the mantle");
        let local = m.placement().to_local(&p);
        assert_relative_eq!(local.z.abs(), 5.0, epsilon = 1e-9);
    }
}

#[test]
fn partial_mantle_spans_its_angular_range() {
    let m = ConeMantle::cylinder(2.0, 1.0)
        .unwrap()
        .with_angular_range(0.0, std::f64::consts::FRAC_PI_2)
        .unwrap();
    let mesh = Mesh::shell(&m, 4).unwrap();
    assert_relative_eq!(mesh.vertex(0), Point3::new(2.0, 0.0, -1.0), epsilon = 1e-12);
    assert_relative_eq!(mesh.vertex(4), Point3::new(0.0, 2.0, -1.0), epsilon = 1e-12);
}

#[test]
fn zero_segments_is_rejected() {
    let m = placed_frustum();
    assert!(matches!(Mesh::shell(&m, 0), Err(GeometryError::InvalidArgument(_))));
    assert!(matches!(Mesh::wireframe(&m, 0, 2), Err(GeometryError::InvalidArgument(_))));
    assert!(triangulate(&m, 0).is_err());
}

// ---------------------------------------------------------------------------
// Wireframe mode
// ---------------------------------------------------------------------------

#[test]
fn wireframe_counts() {
    let m = placed_frustum();
    for (n, v) in [(4, 0), (4, 2), (10, 4), (36, 36)] {
        let mesh = Mesh::wireframe(&m, n, v).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * (n + 1));
        assert_eq!(mesh.connectivity.len(), v + 2 * n, "n={n}, v={v}");
        assert!(mesh.connectivity.iter().all(|c| c.len() == 2));
        assert_indices_in_bounds(&mesh, "wireframe");
    }
}

#[test]
fn wireframe_vertical_lines_are_clamped() {
    let full = ConeMantle::cylinder(1.0, 1.0).unwrap();
    let mesh = Mesh::wireframe(&full, 6, 50).unwrap();
    assert_eq!(mesh.connectivity.len(), 6 + 2 * 6);

    let partial = full.with_angular_range(0.0, 1.0).unwrap();
    let mesh = Mesh::wireframe(&partial, 6, 50).unwrap();
    assert_eq!(mesh.connectivity.len(), 7 + 2 * 6);
}

#[test]
fn wireframe_vertical_edges_are_axial() {
    let m = ConeMantle::cylinder(1.0, 2.0).unwrap();
    let n = 8;
    let mesh = Mesh::wireframe(&m, n, 4).unwrap();
    let Connectivity::Edges(edges) = &mesh.connectivity else {
        panic!("expected edges");
    };
    for &[a, b] in &edges[..4] {
        assert_eq!(b, a + n + 1);
        assert_relative_eq!(mesh.x[a], mesh.x[b], epsilon = 1e-12);
        assert_relative_eq!(mesh.y[a], mesh.y[b], epsilon = 1e-12);
    }
    // Rim polylines follow.
    assert_eq!(edges[4], [0, 1]);
    assert_eq!(edges[4 + n], [n + 1, n + 2]);
}

#[test]
fn resolution_defaults_drive_both_modes() {
    let m = placed_frustum();
    let res = MeshResolution::default();
    let shell = res.shell(&m).unwrap();
    let wire = res.wireframe(&m).unwrap();
    assert_eq!(shell.connectivity.len(), res.angular_segments);
    assert_eq!(
        wire.connectivity.len(),
        res.vertical_lines + 2 * res.angular_segments
    );
}

// ---------------------------------------------------------------------------
// Handoff
// ---------------------------------------------------------------------------

#[test]
fn unit_scaling_multiplies_all_coordinates() {
    let m = placed_frustum();
    let mesh = Mesh::shell(&m, 6).unwrap();
    let mm = mesh.scaled(1000.0).unwrap();
    assert_eq!(mm.connectivity, mesh.connectivity);
    for i in 0..mesh.vertex_count() {
        assert_relative_eq!(mm.vertex(i), mesh.vertex(i) * 1000.0, epsilon = 1e-9);
    }
    assert!(mesh.scaled(0.0).is_err());
    assert!(mesh.scaled(f64::NAN).is_err());
}

#[test]
fn triangulation_splits_each_quad() {
    let m = placed_frustum();
    let n = 10;
    let tri = triangulate(&m, n).unwrap();
    assert_eq!(tri.vertices.len(), 2 * (n + 1));
    assert_eq!(tri.triangle_count(), 2 * n);
    for nrm in &tri.normals {
        assert_relative_eq!(nrm.norm(), 1.0, epsilon = 1e-12);
    }
    let nv = tri.vertices.len() as u32;
    assert!(tri.indices.iter().all(|&i| i < nv));
}

#[test]
fn binary_layout_header() {
    let m = ConeMantle::cylinder(1.0, 1.0).unwrap();
    let tri = triangulate(&m, 4).unwrap();
    let buf = tri.to_binary();
    let nv = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    assert_eq!(nv, tri.vertices.len());
    let off = 4 + 24 * nv;
    let ni = u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]) as usize;
    assert_eq!(ni, tri.indices.len());
    assert_eq!(buf.len(), off + 4 + 4 * ni);
}
