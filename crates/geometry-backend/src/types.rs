use std::path::PathBuf;

use sample_types::{BoundingBox, BoundsError, Point3d};
use serde::{Deserialize, Serialize};

/// The solid itself is unusable: missing, empty, or without computable bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("shape is empty")]
    EmptyShape,

    #[error("shape has no usable bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("geometry file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse geometry file {}: {reason}", path.display())]
    ParseFailed { path: PathBuf, reason: String },

    #[error("no solids found in {}", path.display())]
    NoSolids { path: PathBuf },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("primitive construction failed: {reason}")]
    PrimitiveFailed { reason: String },
}

/// A capability call itself failed, independent of the solid's validity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapabilityError {
    #[error("{operation} query failed: {reason}")]
    QueryFailed { operation: String, reason: String },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },
}

/// Errors from geometry backend calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

impl BackendError {
    pub fn query_failed(operation: &str, reason: impl Into<String>) -> Self {
        BackendError::Capability(CapabilityError::QueryFailed {
            operation: operation.to_string(),
            reason: reason.into(),
        })
    }
}

/// Indexed triangle mesh used for classification and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub positions: Vec<[f64; 3]>,
    /// Triangles as indices into `positions`.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of triangle `i`.
    pub fn triangle(&self, i: usize) -> [[f64; 3]; 3] {
        let [a, b, c] = self.triangles[i];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for p in &self.positions {
            bb.expand_to_include(&Point3d::from_array(*p));
        }
        bb
    }

    /// Append another mesh, offsetting its indices.
    pub fn append(&mut self, other: &TriangleMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|[a, b, c]| [a + base, b + base, c + base]),
        );
    }

    /// Check every index points at an existing position.
    pub fn validate_indices(&self) -> Result<(), GeometryError> {
        let n = self.positions.len() as u32;
        for (i, tri) in self.triangles.iter().enumerate() {
            if let Some(bad) = tri.iter().find(|&&idx| idx >= n) {
                return Err(GeometryError::TessellationFailed {
                    reason: format!(
                        "triangle {} references vertex {} (vertex count = {})",
                        i, bad, n
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_triangle() -> TriangleMesh {
        TriangleMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 3.0]],
            triangles: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn test_mesh_bounds() {
        let bb = one_triangle().bounding_box();
        assert_eq!(bb.min, Point3d::ORIGIN);
        assert_eq!(bb.max, Point3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = one_triangle();
        mesh.append(&one_triangle());
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.triangles[1], [3, 4, 5]);
        assert!(mesh.validate_indices().is_ok());
    }

    #[test]
    fn test_validate_indices_catches_overflow() {
        let mut mesh = one_triangle();
        mesh.triangles.push([0, 1, 7]);
        assert!(matches!(
            mesh.validate_indices(),
            Err(GeometryError::TessellationFailed { .. })
        ));
    }

    #[test]
    fn test_error_kinds_are_preserved() {
        let e: BackendError = GeometryError::EmptyShape.into();
        assert_eq!(e, BackendError::Geometry(GeometryError::EmptyShape));
        let q = BackendError::query_failed("is_inside", "boom");
        assert_eq!(q.to_string(), "is_inside query failed: boom");
    }
}
