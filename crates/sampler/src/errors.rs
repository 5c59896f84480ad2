use geometry_backend::{BackendError, CapabilityError, GeometryError};
use sample_types::BoundsError;

/// Invalid sampler parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("target draw count must not be negative, got {value}")]
    NegativeDraws { value: i64 },

    #[error("invalid bounding box override: {0}")]
    InvalidBoundingBox(#[from] BoundsError),

    #[error("parallel chunk size must be at least 1")]
    ZeroChunkSize,
}

/// Errors from a sampling run. A failed run yields no partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl From<BackendError> for SampleError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Geometry(g) => SampleError::Geometry(g),
            BackendError::Capability(c) => SampleError::Capability(c),
        }
    }
}
