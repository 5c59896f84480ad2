pub mod mesh_solid;
pub mod mock_backend;
pub mod primitives;
pub mod step_import;
pub mod tessellation;
pub mod traits;
pub mod truck_backend;
pub mod types;

pub use mesh_solid::{MeshSolid, PointClassification};
pub use mock_backend::{MockBackend, MockSolid};
pub use traits::*;
pub use truck_backend::{TruckBackend, TruckSolid};
pub use types::*;
