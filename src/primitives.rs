//! Minimal brush primitive construction: axis-aligned box plane lists.
//! A brush primitive factory (box, wedge, cylinder, arch, sphere) lives
//! upstream of this evaluator; this module keeps only the one shape
//! the crate's own scenario tests need to build brushes at all.

use crate::float_types::Real;
use crate::plane::Plane;
use nalgebra::Point3;

/// The six outward-facing unit-normal planes of an axis-aligned box
/// centered at `center` with half-extents `half_extent` along each
/// axis. Order: `+x, -x, +y, -y, +z, -z`.
pub fn cuboid_planes(center: Point3<Real>, half_extent: Real) -> Vec<Plane> {
    cuboid_planes_xyz(center, half_extent, half_extent, half_extent)
}

/// As [`cuboid_planes`] but with independent half-extents per axis.
pub fn cuboid_planes_xyz(
    center: Point3<Real>,
    half_x: Real,
    half_y: Real,
    half_z: Real,
) -> Vec<Plane> {
    vec![
        Plane::new(1.0, 0.0, 0.0, -(center.x + half_x)),
        Plane::new(-1.0, 0.0, 0.0, center.x - half_x),
        Plane::new(0.0, 1.0, 0.0, -(center.y + half_y)),
        Plane::new(0.0, -1.0, 0.0, center.y - half_y),
        Plane::new(0.0, 0.0, 1.0, -(center.z + half_z)),
        Plane::new(0.0, 0.0, -1.0, center.z - half_z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{Brush, CsgOperation};

    #[test]
    fn unit_cuboid_has_six_unit_normal_planes() {
        let planes = cuboid_planes(Point3::origin(), 0.5);
        assert_eq!(planes.len(), 6);
        for plane in &planes {
            assert!((plane.normal().norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cuboid_planes_build_a_six_faced_brush() {
        let planes = cuboid_planes(Point3::new(1.0, -2.0, 3.0), 0.75);
        let brush: Brush<i32> = Brush::from_planes(planes, CsgOperation::Additive, 0, 0);
        assert_eq!(brush.face_polygons.len(), 6);
    }
}
