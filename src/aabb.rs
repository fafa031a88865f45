//! Minimal axis-aligned bounding box: the cheap pre-filter ahead of the
//! exact separating-plane overlap test in `relations::brushes_overlap`.

use crate::float_types::Real;
use nalgebra::Point3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Builds the bounding box of a point set. `None` for an empty
    /// iterator — a brush or polygon with no vertices has no volume to
    /// bound, and callers should treat that as "no box to filter on"
    /// rather than a fatal condition.
    pub fn from_points(points: impl Iterator<Item = Point3<Real>>) -> Option<Self> {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(Real::MIN, Real::MIN, Real::MIN);
        let mut any = false;
        for p in points {
            any = true;
            mins.x = mins.x.min(p.x);
            mins.y = mins.y.min(p.y);
            mins.z = mins.z.min(p.z);
            maxs.x = maxs.x.max(p.x);
            maxs.y = maxs.y.max(p.y);
            maxs.z = maxs.z.max(p.z);
        }
        any.then_some(Self { mins, maxs })
    }

    /// Whether this box and `other` overlap (touching faces count as
    /// overlap here — this is a coarse pre-filter only, the exact
    /// separating-plane test in `relations::brushes_overlap` has the
    /// final say).
    pub fn intersects(&self, other: &Self) -> bool {
        self.mins.x <= other.maxs.x
            && self.maxs.x >= other.mins.x
            && self.mins.y <= other.maxs.y
            && self.maxs.y >= other.mins.y
            && self.mins.z <= other.maxs.z
            && self.maxs.z >= other.mins.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn from_points_on_empty_iterator_is_none() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
