//! Monte-Carlo volume estimation built on the sampler.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use geometry_backend::GeometryBackend;
use sample_types::SampleResult;

use crate::config::SamplerConfig;
use crate::errors::SampleError;
use crate::sampler::Sampler;

/// Volume estimate with its binomial standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub volume: f64,
    pub standard_error: f64,
    pub acceptance_ratio: f64,
}

impl VolumeEstimate {
    /// Estimate from a finished run: `V * p` with error `V * sqrt(p(1-p)/n)`,
    /// where `V` is the sampling box volume.
    pub fn from_result(result: &SampleResult) -> Self {
        let p = result.acceptance_ratio();
        let box_volume = result.bounds().volume();
        let standard_error = if result.draws() == 0 {
            0.0
        } else {
            box_volume * (p * (1.0 - p) / result.draws() as f64).sqrt()
        };
        Self {
            volume: box_volume * p,
            standard_error,
            acceptance_ratio: p,
        }
    }
}

/// Estimate the volume of `solid` from `draws` seeded samples.
#[instrument(skip(backend, solid))]
pub fn estimate_volume<B: GeometryBackend>(
    backend: &B,
    solid: &B::Solid,
    draws: usize,
    seed: u64,
) -> Result<VolumeEstimate, SampleError> {
    let sampler = Sampler::new(SamplerConfig::new(draws).with_seed(seed))?;
    let result = sampler.sample(backend, solid)?;
    let estimate = VolumeEstimate::from_result(&result);
    info!(
        volume = estimate.volume,
        standard_error = estimate.standard_error,
        "estimated volume"
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geometry_backend::{MockBackend, MockSolid};
    use sample_types::{BoundingBox, Point3d};

    #[test]
    fn test_estimate_from_result() {
        let bounds = BoundingBox::new(Point3d::ORIGIN, Point3d::new(2.0, 2.0, 2.0));
        let points = vec![Point3d::ORIGIN; 25];
        let est = VolumeEstimate::from_result(&SampleResult::new(points, 100, bounds));
        assert_relative_eq!(est.acceptance_ratio, 0.25);
        assert_relative_eq!(est.volume, 2.0);
        assert_relative_eq!(est.standard_error, 8.0 * (0.25f64 * 0.75 / 100.0).sqrt());
    }

    #[test]
    fn test_zero_draws_has_no_error_bar() {
        let bounds = BoundingBox::new(Point3d::ORIGIN, Point3d::new(1.0, 1.0, 1.0));
        let est = VolumeEstimate::from_result(&SampleResult::new(Vec::new(), 0, bounds));
        assert_eq!(est.volume, 0.0);
        assert_eq!(est.standard_error, 0.0);
    }

    #[test]
    fn test_estimate_volume_sphere() {
        let kb = MockBackend::new();
        let solid = MockSolid::sphere([0.0; 3], 1.0);
        let est = estimate_volume(&kb, &solid, 20_000, 11).unwrap();
        let expected = solid.volume();
        // Well within five standard errors
        assert!(
            (est.volume - expected).abs() < 5.0 * est.standard_error,
            "estimated {} vs exact {} (se {})",
            est.volume,
            expected,
            est.standard_error
        );
    }

    #[test]
    fn test_full_box_has_zero_error() {
        let kb = MockBackend::new();
        let est = estimate_volume(&kb, &MockSolid::cube(10.0), 500, 0).unwrap();
        assert_relative_eq!(est.volume, 1000.0);
        assert_eq!(est.standard_error, 0.0);
    }
}
