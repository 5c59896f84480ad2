//! Deterministic test double implementing GeometryBackend.
//!
//! Solids are analytic (cuboids and spheres), so containment is exact and
//! cheap. Every capability call is counted, and failures can be injected
//! into either capability.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::traits::GeometryBackend;
use crate::types::*;
use sample_types::{BoundingBox, Point3d};

/// An analytic solid with exact containment.
#[derive(Debug, Clone, PartialEq)]
pub enum MockSolid {
    /// Closed axis-aligned box; faces count as inside.
    Cuboid(BoundingBox),
    /// Closed ball; the surface counts as inside.
    Sphere { center: Point3d, radius: f64 },
    /// A shape with no volume and no bounds.
    Empty,
}

impl MockSolid {
    pub fn cuboid(min: [f64; 3], max: [f64; 3]) -> Self {
        MockSolid::Cuboid(BoundingBox::new(min.into(), max.into()))
    }

    pub fn cube(side: f64) -> Self {
        Self::cuboid([0.0; 3], [side; 3])
    }

    pub fn sphere(center: [f64; 3], radius: f64) -> Self {
        MockSolid::Sphere {
            center: center.into(),
            radius,
        }
    }

    /// Exact volume, for checking estimates.
    pub fn volume(&self) -> f64 {
        match self {
            MockSolid::Cuboid(bb) => bb.volume(),
            MockSolid::Sphere { radius, .. } => 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3),
            MockSolid::Empty => 0.0,
        }
    }

    fn bounds(&self) -> Result<BoundingBox, GeometryError> {
        match self {
            MockSolid::Cuboid(bb) => Ok(*bb),
            MockSolid::Sphere { center, radius } => Ok(BoundingBox::new(
                Point3d::new(center.x - radius, center.y - radius, center.z - radius),
                Point3d::new(center.x + radius, center.y + radius, center.z + radius),
            )),
            MockSolid::Empty => Err(GeometryError::EmptyShape),
        }
    }

    fn contains(&self, p: &Point3d) -> bool {
        match self {
            MockSolid::Cuboid(bb) => bb.contains(p),
            MockSolid::Sphere { center, radius } => {
                center.distance_squared_to(p) <= radius * radius
            }
            MockSolid::Empty => false,
        }
    }
}

/// Deterministic test double for the geometry capabilities.
#[derive(Debug, Default)]
pub struct MockBackend {
    bounding_box_calls: AtomicUsize,
    is_inside_calls: AtomicUsize,
    /// Returned by every bounding_box call instead of the solid's bounds.
    bounds_failure: Option<BackendError>,
    /// Containment fails once this many calls have succeeded.
    inside_failure_after: Option<usize>,
    /// Reported instead of the solid's true bounds.
    reported_bounds: Option<BoundingBox>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every bounding_box call fail with `error`.
    pub fn with_bounds_failure(mut self, error: impl Into<BackendError>) -> Self {
        self.bounds_failure = Some(error.into());
        self
    }

    /// Let `successes` containment calls through, then fail every later one.
    pub fn failing_inside_after(mut self, successes: usize) -> Self {
        self.inside_failure_after = Some(successes);
        self
    }

    /// Report `bounds` from bounding_box regardless of the solid.
    pub fn reporting_bounds(mut self, bounds: BoundingBox) -> Self {
        self.reported_bounds = Some(bounds);
        self
    }

    pub fn bounding_box_calls(&self) -> usize {
        self.bounding_box_calls.load(Ordering::SeqCst)
    }

    pub fn is_inside_calls(&self) -> usize {
        self.is_inside_calls.load(Ordering::SeqCst)
    }

    pub fn reset_counters(&self) {
        self.bounding_box_calls.store(0, Ordering::SeqCst);
        self.is_inside_calls.store(0, Ordering::SeqCst);
    }
}

impl GeometryBackend for MockBackend {
    type Solid = MockSolid;
    type Vertex = Point3d;

    fn bounding_box(&self, solid: &MockSolid) -> Result<BoundingBox, BackendError> {
        self.bounding_box_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.bounds_failure {
            return Err(err.clone());
        }
        let bounds = solid.bounds()?;
        Ok(self.reported_bounds.unwrap_or(bounds))
    }

    fn is_inside(&self, solid: &MockSolid, point: &Point3d) -> Result<bool, BackendError> {
        let prior = self.is_inside_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.inside_failure_after {
            if prior >= limit {
                return Err(BackendError::query_failed(
                    "is_inside",
                    format!("injected failure on call {}", prior + 1),
                ));
            }
        }
        Ok(solid.contains(point))
    }

    fn make_vertex(&self, point: &Point3d) -> Point3d {
        *point
    }
}
