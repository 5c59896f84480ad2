use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::point::Point3d;

/// A serialized result whose counts disagree with its points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResultError {
    #[error("{points} points recorded but accepted = {accepted}")]
    AcceptedMismatch { points: usize, accepted: usize },

    #[error("{accepted} points accepted from only {draws} draws")]
    MoreAcceptedThanDrawn { accepted: usize, draws: usize },
}

/// Outcome of one sampling run.
///
/// Points are stored in acceptance order, which is also draw order.
/// Fields are private so a returned result cannot be edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleResult")]
pub struct SampleResult {
    points: Vec<Point3d>,
    draws: usize,
    accepted: usize,
    bounds: BoundingBox,
}

#[derive(Deserialize)]
struct RawSampleResult {
    points: Vec<Point3d>,
    draws: usize,
    accepted: usize,
    bounds: BoundingBox,
}

impl TryFrom<RawSampleResult> for SampleResult {
    type Error = ResultError;

    fn try_from(raw: RawSampleResult) -> Result<Self, Self::Error> {
        if raw.accepted != raw.points.len() {
            return Err(ResultError::AcceptedMismatch {
                points: raw.points.len(),
                accepted: raw.accepted,
            });
        }
        if raw.accepted > raw.draws {
            return Err(ResultError::MoreAcceptedThanDrawn {
                accepted: raw.accepted,
                draws: raw.draws,
            });
        }
        Ok(Self::new(raw.points, raw.draws, raw.bounds))
    }
}

impl SampleResult {
    pub fn new(points: Vec<Point3d>, draws: usize, bounds: BoundingBox) -> Self {
        debug_assert!(points.len() <= draws);
        let accepted = points.len();
        Self {
            points,
            draws,
            accepted,
            bounds,
        }
    }

    /// Accepted points in acceptance order.
    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    /// Number of candidate points drawn.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejected(&self) -> usize {
        self.draws - self.accepted
    }

    /// The volume the candidates were drawn from.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fraction of draws accepted; 0 when nothing was drawn.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.draws == 0 {
            0.0
        } else {
            self.accepted as f64 / self.draws as f64
        }
    }

    /// Monte-Carlo estimate of the solid's volume within the sampling box.
    pub fn estimated_volume(&self) -> f64 {
        self.bounds.volume() * self.acceptance_ratio()
    }
}
