//! Parameters for a sampling run.

use sample_types::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// Default number of candidate draws per run.
pub const DEFAULT_TARGET_DRAWS: usize = 100_000;

/// Default number of draws handled by one parallel task.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Configuration for one sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Candidate points to draw (not the number to accept).
    pub target_draws: usize,
    /// Sampling volume to use instead of the solid's own bounds.
    pub bounding_box_override: Option<BoundingBox>,
    /// Seed for the ChaCha8 generator.
    pub seed: u64,
    /// Draws per task in parallel runs. Part of the draw sequence, so
    /// changing it changes the parallel output.
    pub parallel_chunk_size: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            target_draws: DEFAULT_TARGET_DRAWS,
            bounding_box_override: None,
            seed: 0,
            parallel_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SamplerConfig {
    pub fn new(target_draws: usize) -> Self {
        Self {
            target_draws,
            ..Self::default()
        }
    }

    /// Config from a signed count, as read from user input.
    pub fn from_signed_draws(target_draws: i64) -> Result<Self, ConfigurationError> {
        let draws = usize::try_from(target_draws)
            .map_err(|_| ConfigurationError::NegativeDraws { value: target_draws })?;
        Ok(Self::new(draws))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bounding_box(mut self, bounds: BoundingBox) -> Self {
        self.bounding_box_override = Some(bounds);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.parallel_chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(bb) = &self.bounding_box_override {
            bb.validate()?;
        }
        if self.parallel_chunk_size == 0 {
            return Err(ConfigurationError::ZeroChunkSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_types::Point3d;

    #[test]
    fn test_default_is_valid() {
        let cfg = SamplerConfig::default();
        assert_eq!(cfg.target_draws, DEFAULT_TARGET_DRAWS);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_negative_draws_rejected() {
        assert_eq!(
            SamplerConfig::from_signed_draws(-1).unwrap_err(),
            ConfigurationError::NegativeDraws { value: -1 }
        );
        assert_eq!(SamplerConfig::from_signed_draws(0).unwrap().target_draws, 0);
        assert_eq!(SamplerConfig::from_signed_draws(25).unwrap().target_draws, 25);
    }

    #[test]
    fn test_inverted_override_rejected() {
        let cfg = SamplerConfig::new(10).with_bounding_box(BoundingBox::new(
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 1.0),
        ));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigurationError::InvalidBoundingBox(_))
        ));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let cfg = SamplerConfig::new(10).with_chunk_size(0);
        assert_eq!(cfg.validate(), Err(ConfigurationError::ZeroChunkSize));
    }
}
