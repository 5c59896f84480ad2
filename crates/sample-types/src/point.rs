use serde::{Deserialize, Serialize};

/// A point in 3D Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Coordinate along axis `i` (0 = x, 1 = y, 2 = z).
    pub fn axis(&self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<[f64; 3]> for Point3d {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point3d> for [f64; 3] {
    fn from(p: Point3d) -> Self {
        p.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let a = Point3d::new(1.0, 0.0, 0.0);
        let b = Point3d::new(4.0, 4.0, 0.0);
        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(a.distance_squared_to(&b), 25.0);
    }

    #[test]
    fn test_point_axis_access() {
        let p = Point3d::new(1.0, 2.0, 3.0);
        assert_eq!(p.axis(0), 1.0);
        assert_eq!(p.axis(1), 2.0);
        assert_eq!(p.axis(2), 3.0);
        assert_eq!(Point3d::from(p.to_array()), p);
    }

    #[test]
    fn test_point_finiteness() {
        assert!(Point3d::ORIGIN.is_finite());
        assert!(!Point3d::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3d::new(0.0, f64::INFINITY, 0.0).is_finite());
    }
}
