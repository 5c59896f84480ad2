//! Geometry capabilities backed by the truck BREP library.
//!
//! Solids are tessellated once on construction; bounds and containment are
//! answered from the tessellation.

use std::path::Path;

use tracing::debug;
use truck_modeling::{builder, Point3};

use crate::mesh_solid::MeshSolid;
use crate::primitives;
use crate::step_import;
use crate::tessellation;
use crate::traits::{GeometryBackend, ShapeLoader};
use crate::types::*;
use sample_types::{BoundingBox, Point3d};

/// Default chord tolerance for tessellation, in model units.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// A truck solid prepared for sampling.
#[derive(Debug, Clone)]
pub struct TruckSolid {
    name: String,
    mesh: MeshSolid,
}

impl TruckSolid {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &TriangleMesh {
        self.mesh.mesh()
    }
}

/// Real geometry backend backed by truck.
#[derive(Debug, Clone)]
pub struct TruckBackend {
    tolerance: f64,
}

impl TruckBackend {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Backend using `tolerance` both as the tessellation chord tolerance
    /// and as the on-surface distance for containment.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Wrap an already-built truck solid.
    pub fn prepare(
        &self,
        name: impl Into<String>,
        solid: &truck_modeling::Solid,
    ) -> Result<TruckSolid, BackendError> {
        let mesh = tessellation::tessellate_solid(solid, self.tolerance)?;
        self.prepare_mesh(name, mesh)
    }

    /// Wrap an existing closed triangle mesh.
    pub fn prepare_mesh(
        &self,
        name: impl Into<String>,
        mesh: TriangleMesh,
    ) -> Result<TruckSolid, BackendError> {
        let name = name.into();
        debug!(%name, triangles = mesh.triangle_count(), "prepared solid");
        Ok(TruckSolid {
            name,
            mesh: MeshSolid::new(mesh, self.tolerance)?,
        })
    }

    pub fn make_box(&self, origin: [f64; 3], size: [f64; 3]) -> Result<TruckSolid, BackendError> {
        let solid = primitives::make_box(origin, size[0], size[1], size[2])?;
        self.prepare("box", &solid)
    }

    pub fn make_cylinder(
        &self,
        base_center: [f64; 3],
        radius: f64,
        height: f64,
    ) -> Result<TruckSolid, BackendError> {
        let solid = primitives::make_cylinder(base_center, radius, height)?;
        self.prepare("cylinder", &solid)
    }

    pub fn make_sphere(&self, center: [f64; 3], radius: f64) -> Result<TruckSolid, BackendError> {
        let solid = primitives::make_sphere(center, radius)?;
        self.prepare("sphere", &solid)
    }
}

impl Default for TruckBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBackend for TruckBackend {
    type Solid = TruckSolid;
    type Vertex = truck_modeling::Vertex;

    fn bounding_box(&self, solid: &TruckSolid) -> Result<BoundingBox, BackendError> {
        Ok(*solid.mesh.bounds())
    }

    fn is_inside(&self, solid: &TruckSolid, point: &Point3d) -> Result<bool, BackendError> {
        if !point.is_finite() {
            return Err(BackendError::query_failed(
                "is_inside",
                format!("non-finite point {:?}", point),
            ));
        }
        Ok(solid.mesh.contains(point))
    }

    fn make_vertex(&self, point: &Point3d) -> truck_modeling::Vertex {
        builder::vertex(Point3::new(point.x, point.y, point.z))
    }
}

impl ShapeLoader for TruckBackend {
    type Solid = TruckSolid;

    fn load_solids(&self, path: &Path) -> Result<Vec<TruckSolid>, BackendError> {
        let meshes = step_import::load_step_meshes(path, self.tolerance)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "solid".to_string());
        meshes
            .into_iter()
            .enumerate()
            .map(|(i, mesh)| self.prepare_mesh(format!("{}_{}", stem, i + 1), mesh))
            .collect()
    }
}
