//! STL export of a solid's tessellation, binary and ASCII.
//!
//! Any mesh viewer opens these, which is how a sampled solid is inspected
//! alongside its point table.

use std::fs;
use std::path::Path;

use geometry_backend::TriangleMesh;
use tracing::debug;

use crate::errors::ExportError;

/// On-disk STL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

fn check_mesh(mesh: &TriangleMesh, name: &str) -> Result<(), ExportError> {
    if mesh.is_empty() {
        return Err(ExportError::EmptyMesh {
            name: name.to_string(),
        });
    }
    mesh.validate_indices()
        .map_err(|e| ExportError::InvalidMesh {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Unit facet normal from the winding; degenerate facets get +Z.
fn facet_normal(tri: &[[f64; 3]; 3]) -> [f64; 3] {
    let [a, b, c] = tri;
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Binary STL.
///
/// Layout:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn export_binary_stl(mesh: &TriangleMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    check_mesh(mesh, name)?;
    let tri_count = mesh.triangle_count();

    let mut buf = Vec::with_capacity(80 + 4 + tri_count * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for i in 0..tri_count {
        let tri = mesh.triangle(i);
        for c in facet_normal(&tri) {
            buf.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for vertex in &tri {
            for &c in vertex {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count (unused)
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// ASCII STL.
pub fn export_ascii_stl(mesh: &TriangleMesh, name: &str) -> Result<String, ExportError> {
    check_mesh(mesh, name)?;
    let tri_count = mesh.triangle_count();

    let mut out = String::with_capacity(tri_count * 300);
    out.push_str(&format!("solid {}\n", name));

    for i in 0..tri_count {
        let tri = mesh.triangle(i);
        let [nx, ny, nz] = facet_normal(&tri);
        out.push_str(&format!("  facet normal {} {} {}\n", nx, ny, nz));
        out.push_str("    outer loop\n");
        for [x, y, z] in tri {
            out.push_str(&format!("      vertex {} {} {}\n", x, y, z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {}\n", name));
    Ok(out)
}

/// Export `mesh` to `path` in the given format.
pub fn write_stl_file(
    path: &Path,
    mesh: &TriangleMesh,
    name: &str,
    format: StlFormat,
) -> Result<(), ExportError> {
    let bytes = match format {
        StlFormat::Binary => export_binary_stl(mesh, name)?,
        StlFormat::Ascii => export_ascii_stl(mesh, name)?.into_bytes(),
    };
    fs::write(path, &bytes).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), triangles = mesh.triangle_count(), ?format, "wrote STL");
    Ok(())
}
