//! Primitive solids built from truck's sweep API.
//!
//! truck has no built-in box/cylinder/sphere; everything is successive sweeps.

use std::f64::consts::PI;
use truck_modeling::builder;
use truck_modeling::topology::{Solid, Wire};
use truck_modeling::{Point3, Rad, Vector3};

use crate::types::GeometryError;

fn check_positive(name: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::PrimitiveFailed {
            reason: format!("{} must be positive and finite, got {}", name, value),
        })
    }
}

/// Box solid with its minimum corner at `origin`, extending by (w,h,d).
pub fn make_box(origin: [f64; 3], w: f64, h: f64, d: f64) -> Result<Solid, GeometryError> {
    check_positive("width", w)?;
    check_positive("height", h)?;
    check_positive("depth", d)?;
    let v = builder::vertex(Point3::new(origin[0], origin[1], origin[2]));
    let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, h, 0.0));
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, d)))
}

/// Cylinder: circle wire → face → translational sweep.
/// Base centered at `base_center` in the XY plane, extending along +Z.
pub fn make_cylinder(base_center: [f64; 3], radius: f64, height: f64) -> Result<Solid, GeometryError> {
    check_positive("radius", radius)?;
    check_positive("height", height)?;
    let [cx, cy, cz] = base_center;
    let v = builder::vertex(Point3::new(cx + radius, cy, cz));
    let wire = builder::rsweep(&v, Point3::new(cx, cy, cz), Vector3::unit_z(), Rad(2.0 * PI));
    let face = builder::try_attach_plane(&[wire]).map_err(|e| GeometryError::PrimitiveFailed {
        reason: format!("circular face: {:?}", e),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Sphere: meridian arc from pole to pole, revolved 2π about Z.
///
/// Both poles lie on the axis, so `cone` collapses the degenerate edges
/// there and the shell closes.
pub fn make_sphere(center: [f64; 3], radius: f64) -> Result<Solid, GeometryError> {
    check_positive("radius", radius)?;
    let [cx, cy, cz] = center;
    let c = Point3::new(cx, cy, cz);

    let north = builder::vertex(Point3::new(cx, cy, cz + radius));
    let meridian: Wire = builder::rsweep(&north, c, Vector3::unit_y(), Rad(PI));
    let shell = builder::cone(&meridian, Vector3::unit_z(), Rad(2.0 * PI));

    Solid::try_new(vec![shell]).map_err(|e| GeometryError::PrimitiveFailed {
        reason: format!("sphere shell: {:?}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_box_topology() {
        let solid = make_box([0.0; 3], 1.0, 2.0, 3.0).unwrap();

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Box should have 1 shell");

        let shell = &boundaries[0];
        assert_eq!(shell.face_iter().count(), 6, "Box should have 6 faces");

        let mut vert_ids = std::collections::HashSet::new();
        for v in shell.vertex_iter() {
            vert_ids.insert(v.id());
        }
        assert_eq!(vert_ids.len(), 8, "Box should have 8 vertices");
    }

    #[test]
    fn test_make_box_respects_origin() {
        let solid = make_box([1.0, -2.0, 5.0], 2.0, 3.0, 4.0).unwrap();
        let shell = &solid.boundaries()[0];

        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for v in shell.vertex_iter() {
            let p = v.point();
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        let eps = 1e-10;
        assert!((min[0] - 1.0).abs() < eps);
        assert!((min[1] + 2.0).abs() < eps);
        assert!((min[2] - 5.0).abs() < eps);
        assert!((max[0] - 3.0).abs() < eps);
        assert!((max[1] - 1.0).abs() < eps);
        assert!((max[2] - 9.0).abs() < eps);
    }

    #[test]
    fn test_make_cylinder_topology() {
        let solid = make_cylinder([0.0; 3], 1.0, 2.0).unwrap();
        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Cylinder should have 1 shell");
        // At minimum: top + bottom + side(s).
        assert!(boundaries[0].face_iter().count() >= 3);
    }

    #[test]
    fn test_make_sphere_is_closed_ball() {
        let solid = make_sphere([1.0, 2.0, 3.0], 2.0).unwrap();
        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Sphere should have 1 shell");

        let eps = 1e-10;
        for v in boundaries[0].vertex_iter() {
            let p = v.point();
            let r = ((p[0] - 1.0).powi(2) + (p[1] - 2.0).powi(2) + (p[2] - 3.0).powi(2)).sqrt();
            assert!((r - 2.0).abs() < eps, "vertex off the sphere: {:?}", p);
        }
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(make_box([0.0; 3], 0.0, 1.0, 1.0).is_err());
        assert!(make_cylinder([0.0; 3], -1.0, 1.0).is_err());
        assert!(make_sphere([0.0; 3], f64::NAN).is_err());
    }
}
