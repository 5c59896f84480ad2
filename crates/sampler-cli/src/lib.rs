//! Config-file driven sampling runs for the `solid-sampler` binary.

pub mod config;
pub mod run;

pub use config::{CliError, GeometrySource, Overrides, PrimitiveSpec, RunConfig, Settings};
pub use run::run;
