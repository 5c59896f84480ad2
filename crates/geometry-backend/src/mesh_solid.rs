//! Point-in-solid classification against a closed triangle mesh.
//!
//! Shoots several rays and takes a majority vote over crossing parity.
//! Points within `tolerance` of the surface are reported as on the boundary.

use crate::types::{GeometryError, TriangleMesh};
use sample_types::{BoundingBox, Point3d};

/// Classification of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// A tessellated solid ready for containment queries.
#[derive(Debug, Clone)]
pub struct MeshSolid {
    mesh: TriangleMesh,
    bounds: BoundingBox,
    /// Per-triangle bounds grown by `tolerance`, for the boundary test.
    triangle_bounds: Vec<BoundingBox>,
    tolerance: f64,
}

/// Fixed ray set. Oblique directions avoid grazing axis-aligned edges.
const RAY_DIRECTIONS: [[f64; 3]; 5] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.577_350_269_189_625_8, 0.577_350_269_189_625_8, 0.577_350_269_189_625_8],
    [-0.863_868_425_581_36, 0.431_934_212_790_68, 0.259_160_527_674_408],
];

impl MeshSolid {
    pub fn new(mesh: TriangleMesh, tolerance: f64) -> Result<Self, GeometryError> {
        if mesh.is_empty() {
            return Err(GeometryError::EmptyShape);
        }
        mesh.validate_indices()?;
        let bounds = mesh.bounding_box();
        bounds.validate()?;

        let triangle_bounds = (0..mesh.triangle_count())
            .map(|i| {
                let tri = mesh.triangle(i);
                BoundingBox::from_points(&tri.map(Point3d::from_array)).expanded(tolerance)
            })
            .collect();

        Ok(Self {
            mesh,
            bounds,
            triangle_bounds,
            tolerance,
        })
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Inside or on the boundary.
    pub fn contains(&self, point: &Point3d) -> bool {
        self.classify(point) != PointClassification::Outside
    }

    pub fn classify(&self, point: &Point3d) -> PointClassification {
        if !self.bounds.expanded(self.tolerance).contains(point) {
            return PointClassification::Outside;
        }

        if self.is_on_surface(point) {
            return PointClassification::OnBoundary;
        }

        let origin = point.to_array();
        let mut inside_votes = 0;
        let mut outside_votes = 0;

        for dir in &RAY_DIRECTIONS {
            if self.count_ray_crossings(origin, *dir) % 2 == 1 {
                inside_votes += 1;
            } else {
                outside_votes += 1;
            }
        }

        if inside_votes > outside_votes {
            PointClassification::Inside
        } else {
            PointClassification::Outside
        }
    }

    fn is_on_surface(&self, point: &Point3d) -> bool {
        let p = point.to_array();
        let tol_sq = self.tolerance * self.tolerance;
        self.triangle_bounds
            .iter()
            .enumerate()
            .filter(|(_, bb)| bb.contains(point))
            .any(|(i, _)| {
                let [a, b, c] = self.mesh.triangle(i);
                distance_squared(p, closest_point_on_triangle(p, a, b, c)) <= tol_sq
            })
    }

    /// Count distinct boundary crossings along a ray.
    ///
    /// Hits within tolerance of each other are merged so a ray through a
    /// shared edge is not counted once per adjacent triangle.
    fn count_ray_crossings(&self, origin: [f64; 3], dir: [f64; 3]) -> usize {
        let mut hit_ts: Vec<f64> = Vec::new();
        for i in 0..self.mesh.triangle_count() {
            let [a, b, c] = self.mesh.triangle(i);
            if let Some(t) = ray_triangle(origin, dir, a, b, c) {
                if t > self.tolerance {
                    hit_ts.push(t);
                }
            }
        }
        deduplicate_crossings(&mut hit_ts, self.tolerance)
    }
}

/// Sort hit parameters and merge clusters within `tolerance` of each other.
/// Returns the number of distinct crossings.
fn deduplicate_crossings(ts: &mut [f64], tolerance: f64) -> usize {
    if ts.is_empty() {
        return 0;
    }
    ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut count = 1;
    let mut last = ts[0];
    for &t in ts.iter().skip(1) {
        if (t - last).abs() > tolerance {
            count += 1;
        }
        last = t;
    }
    count
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn add_scaled(a: [f64; 3], d: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] + d[0] * s, a[1] + d[1] * s, a[2] + d[2] * s]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn distance_squared(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = sub(a, b);
    dot(d, d)
}

/// Möller–Trumbore ray/triangle intersection. Returns the ray parameter.
fn ray_triangle(
    origin: [f64; 3],
    dir: [f64; 3],
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
) -> Option<f64> {
    const EPS: f64 = 1e-12;
    let e1 = sub(b, a);
    let e2 = sub(c, a);
    let h = cross(dir, e2);
    let det = dot(e1, h);
    if det.abs() < EPS {
        return None;
    }
    let inv = 1.0 / det;
    let s = sub(origin, a);
    let u = inv * dot(s, h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = cross(s, e1);
    let v = inv * dot(dir, q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    Some(inv * dot(e2, q))
}

/// Closest point on triangle `abc` to `p` (Voronoi region walk).
fn closest_point_on_triangle(p: [f64; 3], a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> [f64; 3] {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ap = sub(p, a);
    let d1 = dot(ab, ap);
    let d2 = dot(ac, ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = sub(p, b);
    let d3 = dot(ab, bp);
    let d4 = dot(ac, bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return add_scaled(a, ab, v);
    }

    let cp = sub(p, c);
    let d5 = dot(ab, cp);
    let d6 = dot(ac, cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return add_scaled(a, ac, w);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return add_scaled(b, sub(c, b), w);
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    add_scaled(add_scaled(a, ab, v), ac, w)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Closed cube mesh, 12 triangles, corners at `min` and `min + side`.
    pub(crate) fn cube_mesh(min: [f64; 3], side: f64) -> TriangleMesh {
        let [x, y, z] = min;
        let s = side;
        let positions = vec![
            [x, y, z],
            [x + s, y, z],
            [x + s, y + s, z],
            [x, y + s, z],
            [x, y, z + s],
            [x + s, y, z + s],
            [x + s, y + s, z + s],
            [x, y + s, z + s],
        ];
        let triangles = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        TriangleMesh {
            positions,
            triangles,
        }
    }

    #[test]
    fn test_classify_point_inside_cube() {
        let solid = MeshSolid::new(cube_mesh([0.0; 3], 10.0), 1e-7).unwrap();
        let center = Point3d::new(5.0, 5.0, 5.0);
        assert_eq!(solid.classify(&center), PointClassification::Inside);
        // Off-centre point whose axis rays pass through triangle diagonals.
        let diag = Point3d::new(3.0, 3.0, 3.0);
        assert_eq!(solid.classify(&diag), PointClassification::Inside);
    }

    #[test]
    fn test_classify_point_outside_cube() {
        let solid = MeshSolid::new(cube_mesh([0.0; 3], 10.0), 1e-7).unwrap();
        assert_eq!(
            solid.classify(&Point3d::new(20.0, 20.0, 20.0)),
            PointClassification::Outside
        );
        assert_eq!(
            solid.classify(&Point3d::new(-1.0, 5.0, 5.0)),
            PointClassification::Outside
        );
    }

    #[test]
    fn test_classify_point_on_face() {
        let solid = MeshSolid::new(cube_mesh([0.0; 3], 10.0), 1e-6).unwrap();
        let on_face = Point3d::new(10.0, 4.0, 6.0);
        assert_eq!(solid.classify(&on_face), PointClassification::OnBoundary);
        assert!(solid.contains(&on_face));
    }

    #[test]
    fn test_two_disjoint_cubes() {
        let mut mesh = cube_mesh([0.0; 3], 1.0);
        mesh.append(&cube_mesh([5.0, 0.0, 0.0], 1.0));
        let solid = MeshSolid::new(mesh, 1e-7).unwrap();
        assert!(solid.contains(&Point3d::new(0.5, 0.5, 0.5)));
        assert!(solid.contains(&Point3d::new(5.5, 0.5, 0.5)));
        assert!(!solid.contains(&Point3d::new(3.0, 0.5, 0.5)));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let err = MeshSolid::new(TriangleMesh::default(), 1e-7).unwrap_err();
        assert_eq!(err, GeometryError::EmptyShape);
    }

    #[test]
    fn test_deduplicate_crossings_basic() {
        let mut ts = vec![];
        assert_eq!(deduplicate_crossings(&mut ts, 1e-7), 0);

        let mut ts = vec![1.0, 5.0];
        assert_eq!(deduplicate_crossings(&mut ts, 1e-7), 2);

        // Two hits on a shared edge -> 1 crossing
        let mut ts = vec![5.0, 1.0, 1.0 + 1e-10];
        assert_eq!(deduplicate_crossings(&mut ts, 1e-7), 2);
    }

    #[test]
    fn test_closest_point_regions() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [0.0, 1.0, 0.0];
        assert_eq!(closest_point_on_triangle([-1.0, -1.0, 0.0], a, b, c), a);
        assert_eq!(closest_point_on_triangle([0.25, 0.25, 3.0], a, b, c), [0.25, 0.25, 0.0]);
        let on_edge = closest_point_on_triangle([0.5, -2.0, 0.0], a, b, c);
        assert!(distance_squared(on_edge, [0.5, 0.0, 0.0]) < 1e-20);
    }
}
