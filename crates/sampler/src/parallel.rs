//! Chunked parallel sampling on the rayon pool.
//!
//! Draws are split into chunks of `parallel_chunk_size`. Chunk `k` draws from
//! its own ChaCha8 stream `k` under the configured seed, and chunk results
//! are concatenated in chunk order, so the output does not depend on how many
//! threads run.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, instrument};

use geometry_backend::GeometryBackend;
use sample_types::{Point3d, SampleResult};

use crate::errors::SampleError;
use crate::sampler::{draw_point, log_outcome, resolve_bounds, Sampler};

/// Generator for chunk `chunk` of a parallel run.
pub fn chunk_rng(seed: u64, chunk: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(chunk);
    rng
}

impl Sampler {
    /// Sample across the rayon pool.
    ///
    /// Same call counts as [`Sampler::sample`]: one bounds query, one
    /// containment query per draw. The draw sequence differs from the
    /// sequential one for the same seed.
    #[instrument(skip(self, backend, solid), fields(draws = self.config().target_draws, seed = self.config().seed))]
    pub fn sample_parallel<B>(
        &self,
        backend: &B,
        solid: &B::Solid,
    ) -> Result<SampleResult, SampleError>
    where
        B: GeometryBackend + Sync,
        B::Solid: Sync,
    {
        let config = self.config();
        let bounds = resolve_bounds(solid, config, &mut |s: &B::Solid| backend.bounding_box(s))?;

        let total = config.target_draws;
        let chunk_size = config.parallel_chunk_size;
        let chunks = total.div_ceil(chunk_size);
        debug!(chunks, chunk_size, "splitting draws");

        let parts: Vec<Vec<Point3d>> = (0..chunks)
            .into_par_iter()
            .map(|k| -> Result<Vec<Point3d>, SampleError> {
                let start = k * chunk_size;
                let len = chunk_size.min(total - start);
                let mut rng = chunk_rng(config.seed, k as u64);
                let mut accepted = Vec::new();
                for _ in 0..len {
                    let candidate = draw_point(&bounds, &mut rng);
                    if backend.is_inside(solid, &candidate)? {
                        accepted.push(candidate);
                    }
                }
                Ok(accepted)
            })
            .collect::<Result<_, _>>()?;

        let points = parts.into_iter().flatten().collect();
        let result = SampleResult::new(points, total, bounds);
        log_outcome(&result);
        Ok(result)
    }
}
