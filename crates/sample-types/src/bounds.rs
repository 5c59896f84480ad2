use serde::{Deserialize, Serialize};

use crate::point::Point3d;

/// Reasons a pair of corners does not form a usable bounding box.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsError {
    #[error("bounding box has non-finite coordinates or extent: min={min:?} max={max:?}")]
    NonFinite { min: Point3d, max: Point3d },

    #[error("bounding box min exceeds max on axis {axis}: {min} > {max}")]
    Inverted { axis: usize, min: f64, max: f64 },
}

/// Axis-aligned bounding box.
///
/// `min <= max` holds on every axis for a valid box. Zero extent on an axis
/// is legal and pins that coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// Build a box, rejecting non-finite or inverted corners.
    pub fn try_new(min: Point3d, max: Point3d) -> Result<Self, BoundsError> {
        let bb = Self { min, max };
        bb.validate()?;
        Ok(bb)
    }

    /// An inverted box that any point expands.
    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3d>,
    {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn validate(&self) -> Result<(), BoundsError> {
        let extent_finite = self.extent().iter().all(|e| e.is_finite());
        if !self.min.is_finite() || !self.max.is_finite() || !extent_finite {
            return Err(BoundsError::NonFinite {
                min: self.min,
                max: self.max,
            });
        }
        for axis in 0..3 {
            let (lo, hi) = (self.min.axis(axis), self.max.axis(axis));
            if lo > hi {
                return Err(BoundsError::Inverted {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Inclusive containment on every axis.
    pub fn contains(&self, p: &Point3d) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn extent(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    pub fn volume(&self) -> f64 {
        let [dx, dy, dz] = self.extent();
        dx * dy * dz
    }

    pub fn center(&self) -> Point3d {
        Point3d::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point3d::new(
                self.min.x - margin,
                self.min.y - margin,
                self.min.z - margin,
            ),
            max: Point3d::new(
                self.max.x + margin,
                self.max.y + margin,
                self.max.z + margin,
            ),
        }
    }
}
