pub mod config;
pub mod errors;
pub mod parallel;
pub mod sampler;
pub mod volume;

pub use config::SamplerConfig;
pub use errors::{ConfigurationError, SampleError};
pub use parallel::chunk_rng;
pub use sampler::{sample_with, SampledVertices, Sampler};
pub use volume::{estimate_volume, VolumeEstimate};
