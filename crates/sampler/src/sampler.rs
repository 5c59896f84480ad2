//! Rejection sampling of points inside a solid.
//!
//! Candidates are drawn uniformly from an axis-aligned box and kept when the
//! containment capability accepts them. The box comes from exactly one
//! bounds query; each candidate costs exactly one containment query.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

use geometry_backend::{BackendError, GeometryBackend, GeometryError};
use sample_types::{BoundingBox, Point3d, SampleResult};

use crate::config::SamplerConfig;
use crate::errors::SampleError;

/// Sample `solid` with caller-supplied capabilities.
///
/// `bounding_box_of` is called exactly once, `is_inside` exactly
/// `config.target_draws` times unless a call fails. The first failure aborts
/// the run and no partial result is returned.
pub fn sample_with<S, R, F, G>(
    solid: &S,
    config: &SamplerConfig,
    rng: &mut R,
    mut bounding_box_of: F,
    mut is_inside: G,
) -> Result<SampleResult, SampleError>
where
    S: ?Sized,
    R: Rng + ?Sized,
    F: FnMut(&S) -> Result<BoundingBox, BackendError>,
    G: FnMut(&S, &Point3d) -> Result<bool, BackendError>,
{
    config.validate()?;
    let bounds = resolve_bounds(solid, config, &mut bounding_box_of)?;

    let mut points = Vec::new();
    for _ in 0..config.target_draws {
        let candidate = draw_point(&bounds, rng);
        if is_inside(solid, &candidate)? {
            points.push(candidate);
        }
    }

    let result = SampleResult::new(points, config.target_draws, bounds);
    log_outcome(&result);
    Ok(result)
}

/// Query the solid's bounds once and pick the sampling volume.
///
/// The solid's own box must be usable even when an override replaces it.
pub(crate) fn resolve_bounds<S, F>(
    solid: &S,
    config: &SamplerConfig,
    bounding_box_of: &mut F,
) -> Result<BoundingBox, SampleError>
where
    S: ?Sized,
    F: FnMut(&S) -> Result<BoundingBox, BackendError>,
{
    let solid_bounds = bounding_box_of(solid)?;
    solid_bounds.validate().map_err(GeometryError::from)?;

    match config.bounding_box_override {
        Some(bounds) => {
            debug!(?bounds, ?solid_bounds, "sampling inside override box");
            Ok(bounds)
        }
        None => Ok(solid_bounds),
    }
}

/// One candidate, each coordinate uniform on the closed `[min, max]` range.
pub(crate) fn draw_point<R: Rng + ?Sized>(bounds: &BoundingBox, rng: &mut R) -> Point3d {
    Point3d::new(
        rng.gen_range(bounds.min.x..=bounds.max.x),
        rng.gen_range(bounds.min.y..=bounds.max.y),
        rng.gen_range(bounds.min.z..=bounds.max.z),
    )
}

pub(crate) fn log_outcome(result: &SampleResult) {
    info!(
        draws = result.draws(),
        accepted = result.accepted(),
        ratio = result.acceptance_ratio(),
        "sampling complete"
    );
    if result.draws() > 0 && result.is_empty() {
        warn!(
            draws = result.draws(),
            "no candidate was accepted; check the solid and sampling box"
        );
    }
}

/// Accepted points together with the backend's vertex for each of them.
#[derive(Debug, Clone)]
pub struct SampledVertices<V> {
    pub result: SampleResult,
    /// One vertex per accepted point, in the same order.
    pub vertices: Vec<V>,
}

/// Sampler bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Result<Self, SampleError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Fresh generator for this sampler's seed.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.config.seed)
    }

    /// Sample `solid` with a generator seeded from the configuration.
    /// Equal seeds give equal results.
    #[instrument(skip(self, backend, solid), fields(draws = self.config.target_draws, seed = self.config.seed))]
    pub fn sample<B: GeometryBackend>(
        &self,
        backend: &B,
        solid: &B::Solid,
    ) -> Result<SampleResult, SampleError> {
        let mut rng = self.rng();
        self.sample_with_rng(backend, solid, &mut rng)
    }

    pub fn sample_with_rng<B, R>(
        &self,
        backend: &B,
        solid: &B::Solid,
        rng: &mut R,
    ) -> Result<SampleResult, SampleError>
    where
        B: GeometryBackend,
        R: Rng + ?Sized,
    {
        sample_with(
            solid,
            &self.config,
            rng,
            |s| backend.bounding_box(s),
            |s, p| backend.is_inside(s, p),
        )
    }

    /// Sample, then build a backend vertex for every accepted point.
    #[instrument(skip(self, backend, solid), fields(draws = self.config.target_draws))]
    pub fn sample_retaining_vertices<B: GeometryBackend>(
        &self,
        backend: &B,
        solid: &B::Solid,
    ) -> Result<SampledVertices<B::Vertex>, SampleError> {
        let result = self.sample(backend, solid)?;
        let vertices = result
            .points()
            .iter()
            .map(|p| backend.make_vertex(p))
            .collect();
        Ok(SampledVertices { result, vertices })
    }
}
