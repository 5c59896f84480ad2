//! STEP import via truck-stepio.
//!
//! Each closed shell in the file becomes one solid, ordered by its STEP
//! entity id. Open shells (loose surfaces) are skipped. Void shells of a
//! `BREP_WITH_VOIDS` are not subtracted from their outer shell; they come
//! back as solids of their own.

use std::path::Path;

use tracing::{debug, info, instrument, warn};
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};
use truck_stepio::r#in::Table;

use crate::tessellation::polygon_to_triangles;
use crate::types::*;

/// Read a STEP file and tessellate every shell in it.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_step_meshes(
    path: &Path,
    tolerance: f64,
) -> std::result::Result<Vec<TriangleMesh>, GeometryError> {
    if !path.exists() {
        return Err(GeometryError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| GeometryError::ParseFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let meshes = parse_step_meshes(&text, tolerance).map_err(|e| match e {
        GeometryError::ParseFailed { reason, .. } => GeometryError::ParseFailed {
            path: path.to_path_buf(),
            reason,
        },
        GeometryError::NoSolids { .. } => GeometryError::NoSolids {
            path: path.to_path_buf(),
        },
        other => other,
    })?;
    info!(solids = meshes.len(), "loaded STEP file");
    Ok(meshes)
}

/// A shell is closed when every edge bounds exactly two face uses.
fn is_closed(edge_count: usize, uses: impl IntoIterator<Item = usize>) -> bool {
    let mut counts = vec![0usize; edge_count];
    for index in uses {
        match counts.get_mut(index) {
            Some(count) => *count += 1,
            None => return false,
        }
    }
    edge_count > 0 && counts.iter().all(|&c| c == 2)
}

/// Tessellate every closed shell of an in-memory STEP document.
pub fn parse_step_meshes(
    text: &str,
    tolerance: f64,
) -> std::result::Result<Vec<TriangleMesh>, GeometryError> {
    let table = Table::from_step(text).ok_or_else(|| GeometryError::ParseFailed {
        path: Default::default(),
        reason: "not a readable STEP exchange structure".to_string(),
    })?;

    let mut shells: Vec<_> = table.shell.iter().collect();
    shells.sort_by_key(|(id, _)| **id);

    let mut meshes = Vec::with_capacity(shells.len());
    for (id, holder) in shells {
        let shell = match table.to_compressed_shell(holder) {
            Ok(shell) => shell,
            Err(e) => {
                warn!(shell = id, error = ?e, "skipping shell that failed to convert");
                continue;
            }
        };
        let uses = shell
            .faces
            .iter()
            .flat_map(|face| face.boundaries.iter().flatten().map(|edge| edge.index));
        if !is_closed(shell.edges.len(), uses) {
            warn!(shell = id, "skipping open shell");
            continue;
        }
        let polygon = shell.triangulation(tolerance).to_polygon();
        match polygon_to_triangles(&polygon) {
            Ok(mesh) => {
                debug!(shell = id, triangles = mesh.triangle_count(), "tessellated shell");
                meshes.push(mesh);
            }
            Err(e) => warn!(shell = id, error = %e, "skipping shell with no triangles"),
        }
    }

    if meshes.is_empty() {
        return Err(GeometryError::NoSolids {
            path: Default::default(),
        });
    }
    Ok(meshes)
}
