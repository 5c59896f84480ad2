//! Tessellation wrappers producing TriangleMesh.
//!
//! Wraps truck-meshalgo. Face orientation is not tracked: containment uses
//! crossing parity, which does not depend on winding.

use crate::types::*;
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a single merged mesh.
pub fn tessellate_solid(
    solid: &TruckSolid,
    tolerance: f64,
) -> std::result::Result<TriangleMesh, GeometryError> {
    check_tolerance(tolerance)?;
    let meshed = solid.triangulation(tolerance);
    polygon_to_triangles(&meshed.to_polygon())
}

/// Flatten a PolygonMesh into triangles; quads and n-gons are fanned.
pub fn polygon_to_triangles(
    mesh: &PolygonMesh,
) -> std::result::Result<TriangleMesh, GeometryError> {
    let positions: Vec<[f64; 3]> = mesh.positions().iter().map(|p| [p.x, p.y, p.z]).collect();

    let mut triangles: Vec<[u32; 3]> = Vec::new();
    for tri in mesh.tri_faces() {
        triangles.push([tri[0].pos as u32, tri[1].pos as u32, tri[2].pos as u32]);
    }
    for quad in mesh.quad_faces() {
        let [a, b, c, d] = [quad[0].pos, quad[1].pos, quad[2].pos, quad[3].pos].map(|i| i as u32);
        triangles.push([a, b, c]);
        triangles.push([a, c, d]);
    }
    for poly in mesh.other_faces() {
        for i in 1..poly.len().saturating_sub(1) {
            triangles.push([poly[0].pos as u32, poly[i].pos as u32, poly[i + 1].pos as u32]);
        }
    }

    if triangles.is_empty() {
        return Err(GeometryError::TessellationFailed {
            reason: "tessellation produced no triangles".to_string(),
        });
    }

    let out = TriangleMesh {
        positions,
        triangles,
    };
    out.validate_indices()?;
    Ok(out)
}

fn check_tolerance(tolerance: f64) -> std::result::Result<(), GeometryError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::TessellationFailed {
            reason: format!("tolerance must be positive, got {}", tolerance),
        })
    }
}
