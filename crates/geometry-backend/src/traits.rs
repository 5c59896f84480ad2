use std::path::Path;

use crate::types::BackendError;
use sample_types::{BoundingBox, Point3d};

/// Geometry capabilities the sampler depends on.
/// Implemented by TruckBackend (wraps real truck geometry) and MockBackend
/// (deterministic analytic test double).
pub trait GeometryBackend {
    /// Opaque closed volumetric shape. Only ever borrowed.
    type Solid;

    /// Backend-native handle for a single point.
    type Vertex;

    /// Axis-aligned bounds of the solid.
    fn bounding_box(&self, solid: &Self::Solid) -> Result<BoundingBox, BackendError>;

    /// Whether `point` lies within the solid. Points on the boundary are
    /// classified by the backend's own tolerance rules.
    fn is_inside(&self, solid: &Self::Solid, point: &Point3d) -> Result<bool, BackendError>;

    /// Build a vertex handle for a point.
    fn make_vertex(&self, point: &Point3d) -> Self::Vertex;
}

/// Loads solids from geometry files.
pub trait ShapeLoader {
    type Solid;

    /// Load every solid in the file, in a stable order.
    fn load_solids(&self, path: &Path) -> Result<Vec<Self::Solid>, BackendError>;
}
