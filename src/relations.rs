//! Pairwise brush relations: the separating-axis-like overlap test and
//! the four-valued `PolygonCategory` classification a fragment gets
//! against each brush it might share a surface with.

use crate::brush::Brush;
use crate::float_types::{EPSILON, Real};
use crate::plane::Plane;
use crate::polygon::Polygon;
use nalgebra::{Point3, Vector3};

/// The four-valued lattice a fragment is classified into relative to a
/// brush: strictly interior, on the boundary with agreeing normal, on
/// the boundary with opposing normal, or strictly exterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonCategory {
    Inside,
    Aligned,
    ReverseAligned,
    Outside,
}

/// Classify `p` against a plane set. `n_poly` is the normal of the
/// polygon the point was sampled from, used to disambiguate `Aligned`
/// vs `ReverseAligned` when `p` lands on a face.
pub fn categorize_point(p: &Point3<Real>, planes: &[Plane], n_poly: Vector3<Real>) -> PolygonCategory {
    let distances: Vec<Real> = planes.iter().map(|plane| plane.signed_distance(p)).collect();

    if distances.iter().any(|&d| d > EPSILON) {
        return PolygonCategory::Outside;
    }

    if let Some((plane, _)) = planes
        .iter()
        .zip(distances.iter())
        .find(|(_, &d)| d >= -EPSILON)
    {
        return if n_poly.dot(&plane.normal()) > 0.0 {
            PolygonCategory::Aligned
        } else {
            PolygonCategory::ReverseAligned
        };
    }

    PolygonCategory::Inside
}

/// Delegate to [`categorize_point`] on the polygon's centroid — not
/// any vertex, since a vertex of one brush can coincidentally lie on
/// an edge or corner of another brush's face. Precondition: `q` has
/// already been split so it does not span any plane in `planes`.
pub fn categorize_polygon<S: Clone>(q: &Polygon<S>, planes: &[Plane]) -> PolygonCategory {
    categorize_point(&q.centroid(), planes, q.plane.normal())
}

/// True iff neither brush has a separating plane against the other's
/// constructed vertex set. Touching (shared boundary, zero-volume
/// intersection) returns `false` because of the strict `≥ −EPSILON`
/// comparison below.
pub fn brushes_overlap<S: Clone>(a: &Brush<S>, b: &Brush<S>) -> bool {
    !has_separating_plane(a, b) && !has_separating_plane(b, a)
}

/// Whether `separator`'s planes contain one that keeps every vertex of
/// `other` at or outside its surface (a separating plane).
fn has_separating_plane<S: Clone>(separator: &Brush<S>, other: &Brush<S>) -> bool {
    let other_vertices: Vec<Point3<Real>> = other
        .face_polygons
        .iter()
        .flat_map(|p| p.vertices.iter().map(|v| v.pos))
        .collect();
    if other_vertices.is_empty() {
        // A brush that failed to construct any geometry has no volume
        // to overlap with anything.
        return true;
    }
    separator.world_planes.iter().any(|plane| {
        other_vertices
            .iter()
            .all(|v| plane.signed_distance(v) >= -EPSILON)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::CsgOperation;

    fn box_planes(center: Point3<Real>, he: Real) -> Vec<Plane> {
        vec![
            Plane::new(1.0, 0.0, 0.0, -(center.x + he)),
            Plane::new(-1.0, 0.0, 0.0, center.x - he),
            Plane::new(0.0, 1.0, 0.0, -(center.y + he)),
            Plane::new(0.0, -1.0, 0.0, center.y - he),
            Plane::new(0.0, 0.0, 1.0, -(center.z + he)),
            Plane::new(0.0, 0.0, -1.0, center.z - he),
        ]
    }

    fn box_brush(center: Point3<Real>, he: Real) -> Brush<i32> {
        Brush::from_planes(box_planes(center, he), CsgOperation::Additive, 0, 0)
    }

    #[test]
    fn disjoint_boxes_do_not_overlap() {
        let a = box_brush(Point3::new(-2.0, 0.0, 0.0), 0.5);
        let b = box_brush(Point3::new(2.0, 0.0, 0.0), 0.5);
        assert!(!brushes_overlap(&a, &b));
        assert!(!brushes_overlap(&b, &a));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        // Two unit boxes sharing the x=0.5 face exactly.
        let a = box_brush(Point3::new(0.0, 0.0, 0.0), 0.5);
        let b = box_brush(Point3::new(1.0, 0.0, 0.0), 0.5);
        assert!(!brushes_overlap(&a, &b));
    }

    #[test]
    fn overlapping_boxes_do_overlap() {
        let a = box_brush(Point3::new(0.0, 0.0, 0.0), 0.5);
        let b = box_brush(Point3::new(0.5, 0.0, 0.0), 0.5);
        assert!(brushes_overlap(&a, &b));
        assert!(brushes_overlap(&b, &a));
    }

    #[test]
    fn categorize_point_strictly_inside_box() {
        let planes = box_planes(Point3::new(0.0, 0.0, 0.0), 0.5);
        let category = categorize_point(&Point3::new(0.0, 0.0, 0.0), &planes, Vector3::z());
        assert_eq!(category, PolygonCategory::Inside);
    }

    #[test]
    fn categorize_point_strictly_outside_box() {
        let planes = box_planes(Point3::new(0.0, 0.0, 0.0), 0.5);
        let category = categorize_point(&Point3::new(10.0, 0.0, 0.0), &planes, Vector3::z());
        assert_eq!(category, PolygonCategory::Outside);
    }

    #[test]
    fn categorize_point_on_face_aligned_vs_reverse() {
        let planes = box_planes(Point3::new(0.0, 0.0, 0.0), 0.5);
        let on_face = Point3::new(0.5, 0.0, 0.0);
        let aligned = categorize_point(&on_face, &planes, Vector3::x());
        assert_eq!(aligned, PolygonCategory::Aligned);
        let reverse = categorize_point(&on_face, &planes, -Vector3::x());
        assert_eq!(reverse, PolygonCategory::ReverseAligned);
    }
}
