//! Output layer for sampling runs: point tables, solid meshes for viewing,
//! and JSON run summaries.

pub mod csv;
pub mod errors;
pub mod stl;
pub mod summary;

pub use csv::{read_rows, write_csv_file, write_rows, PointTableWriter, HEADER};
pub use errors::ExportError;
pub use stl::{export_ascii_stl, export_binary_stl, write_stl_file, StlFormat};
pub use summary::{RunSummary, SolidSummary};
