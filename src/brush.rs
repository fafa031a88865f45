//! Brush geometry construction: building a convex polytope's face
//! polygons from its half-space plane set via three-plane-intersection
//! vertex enumeration, inside-test filtering, centroid-based winding
//! sort, and degeneracy rejection.
//!
//! The tangent frame for each face is derived from that face's own
//! plane normal rather than a fixed per-shape basis, since a brush's
//! planes are arbitrary, not axis-aligned.

use crate::aabb::Aabb;
use crate::errors::CsgError;
use crate::float_types::{
    EPSILON_DEDUP_SQUARED, EPSILON_DETERMINANT, EPSILON_INSIDE, Real,
};
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// Minimum plane count for a bounded polytope.
const MIN_PLANES: usize = 4;

/// The boolean role a brush plays in the evaluation chain: a closed
/// tagged union, dispatched on with a `match`, not an inheritance
/// hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOperation {
    Additive,
    Subtractive,
    Intersect,
}

/// A convex polyhedron: a half-space plane set plus its constructed
/// face polygons, CSG role, chain order, and material tag.
#[derive(Debug, Clone)]
pub struct Brush<S: Clone> {
    pub world_planes: Vec<Plane>,
    pub face_polygons: Vec<Polygon<S>>,
    pub operation: CsgOperation,
    pub order: i64,
    pub material: S,
}

impl<S: Clone> Brush<S> {
    /// Build a brush directly from already-constructed face polygons.
    pub const fn new(
        world_planes: Vec<Plane>,
        face_polygons: Vec<Polygon<S>>,
        operation: CsgOperation,
        order: i64,
        material: S,
    ) -> Self {
        Self {
            world_planes,
            face_polygons,
            operation,
            order,
            material,
        }
    }

    /// Construct a brush's face polygons from its plane set. Planes
    /// that fail to contribute (e.g. redundant half-spaces that no
    /// vertex of the polytope lies on) simply produce no face; this is
    /// handled locally and never surfaced as an error.
    pub fn from_planes(
        planes: Vec<Plane>,
        operation: CsgOperation,
        order: i64,
        material: S,
    ) -> Self {
        let face_polygons = build_face_polygons(&planes, &material);
        Self {
            world_planes: planes,
            face_polygons,
            operation,
            order,
            material,
        }
    }

    /// As [`Brush::from_planes`], but rejects a plane set with fewer
    /// than [`MIN_PLANES`] planes up front instead of silently
    /// constructing a faceless brush. Unlike `process`, this
    /// constructor is a boundary a caller invokes directly and can
    /// observe a bad input at.
    pub fn try_from_planes(
        planes: Vec<Plane>,
        operation: CsgOperation,
        order: i64,
        material: S,
    ) -> Result<Self, CsgError> {
        if planes.len() < MIN_PLANES {
            return Err(CsgError::InsufficientPlanes(planes.len()));
        }
        Ok(Self::from_planes(planes, operation, order, material))
    }

    /// Axis-aligned bounding box of every accepted vertex across all
    /// faces. Used as the cheap pre-filter ahead of the exact
    /// separating-plane overlap test. `None` for a brush with zero face
    /// polygons (a degenerate construction) — such a brush has no
    /// volume to overlap with anything.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.face_polygons
                .iter()
                .flat_map(|p| p.vertices.iter().map(|v| v.pos)),
        )
    }
}

/// Solve the three-plane intersection via the cross-product formula:
/// `x = -(d1(n2×n3) + d2(n3×n1) + d3(n1×n2)) / det`, `det = n1·(n2×n3)`.
/// Returns `None` if the triple is near-singular
/// (`|det| ≤ EPSILON_DETERMINANT`) or the result is non-finite.
fn triple_intersection(p1: &Plane, p2: &Plane, p3: &Plane) -> Option<Point3<Real>> {
    let (n1, n2, n3) = (p1.normal(), p2.normal(), p3.normal());
    let det = n1.dot(&n2.cross(&n3));
    if det.abs() <= EPSILON_DETERMINANT {
        return None;
    }
    let numerator =
        -(p1.d * n2.cross(&n3) + p2.d * n3.cross(&n1) + p3.d * n1.cross(&n2));
    let point = numerator / det;
    if point.iter().all(|c| c.is_finite()) {
        Some(Point3::from(point))
    } else {
        None
    }
}

/// Build the face polygon for each plane that contributes one.
fn build_face_polygons<S: Clone>(planes: &[Plane], material: &S) -> Vec<Polygon<S>> {
    let n = planes.len();
    let mut buckets: Vec<Vec<Point3<Real>>> = vec![Vec::new(); n];

    // Enumerate every plane triple, accept points inside every plane.
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let Some(point) = triple_intersection(&planes[i], &planes[j], &planes[k])
                else {
                    continue;
                };
                let inside_all = planes
                    .iter()
                    .all(|plane| plane.signed_distance(&point) <= EPSILON_INSIDE);
                if !inside_all {
                    continue;
                }
                buckets[i].push(point);
                buckets[j].push(point);
                buckets[k].push(point);
            }
        }
    }

    planes
        .iter()
        .zip(buckets.into_iter())
        .filter_map(|(plane, bucket)| build_face(plane, bucket, material.clone()))
        .collect()
}

/// Turn one face's candidate vertex bucket into a polygon: dedupe,
/// winding sort, degeneracy rejection, polygon construction.
fn build_face<S: Clone>(plane: &Plane, bucket: Vec<Point3<Real>>, material: S) -> Option<Polygon<S>> {
    let unique = dedupe_points(bucket);
    if unique.len() < 3 {
        return None;
    }

    let normal = plane.normal();
    let centroid = {
        let sum = unique
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / unique.len() as Real)
    };

    let up = if normal.y.abs() >= 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let tangent = normal.cross(&up).normalize();
    let bitangent = normal.cross(&tangent);

    let mut ordered = unique;
    ordered.sort_by(|a, b| {
        let da = a - centroid;
        let db = b - centroid;
        let angle_a = da.dot(&bitangent).atan2(da.dot(&tangent));
        let angle_b = db.dot(&bitangent).atan2(db.dot(&tangent));
        angle_a.total_cmp(&angle_b)
    });

    // Inspect the first triangle; reverse if it opposes the face normal.
    if ordered.len() >= 3 {
        let e1 = ordered[1] - ordered[0];
        let e2 = ordered[2] - ordered[0];
        if e1.cross(&e2).dot(&normal) < 0.0 {
            ordered.reverse();
        }
    }

    let vertices: Vec<Vertex> = ordered
        .into_iter()
        .map(|p| Vertex::new(p, normal, (0.0, 0.0)))
        .collect();

    let polygon = Polygon::new(vertices, *plane, material);
    (!polygon.is_degenerate()).then_some(polygon)
}

/// Deduplicate candidate face vertices with squared tolerance
/// [`EPSILON_DEDUP_SQUARED`].
fn dedupe_points(points: Vec<Point3<Real>>) -> Vec<Point3<Real>> {
    let mut unique: Vec<Point3<Real>> = Vec::with_capacity(points.len());
    for p in points {
        let is_dup = unique
            .iter()
            .any(|q| (p - q).norm_squared() < EPSILON_DEDUP_SQUARED);
        if !is_dup {
            unique.push(p);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::EPSILON;

    /// Axis-aligned box planes, half-extents `he`, centered at `center`.
    fn box_planes(center: Point3<Real>, he: Real) -> Vec<Plane> {
        vec![
            Plane::new(1.0, 0.0, 0.0, -(center.x + he)), // +x face: x <= center.x+he
            Plane::new(-1.0, 0.0, 0.0, center.x - he),
            Plane::new(0.0, 1.0, 0.0, -(center.y + he)),
            Plane::new(0.0, -1.0, 0.0, center.y - he),
            Plane::new(0.0, 0.0, 1.0, -(center.z + he)),
            Plane::new(0.0, 0.0, -1.0, center.z - he),
        ]
    }

    #[test]
    fn triple_intersection_of_axis_planes_is_exact() {
        let px = Plane::new(1.0, 0.0, 0.0, -1.0); // x = 1
        let py = Plane::new(0.0, 1.0, 0.0, -2.0); // y = 2
        let pz = Plane::new(0.0, 0.0, 1.0, -3.0); // z = 3
        let point = triple_intersection(&px, &py, &pz).unwrap();
        assert!((point - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn parallel_triple_has_no_intersection() {
        let p1 = Plane::new(1.0, 0.0, 0.0, 0.0);
        let p2 = Plane::new(1.0, 0.0, 0.0, -1.0);
        let p3 = Plane::new(0.0, 1.0, 0.0, 0.0);
        assert!(triple_intersection(&p1, &p2, &p3).is_none());
    }

    #[test]
    fn unit_box_has_six_faces_each_area_one() {
        let planes = box_planes(Point3::new(0.0, 0.0, 0.0), 0.5);
        let brush: Brush<i32> =
            Brush::from_planes(planes, CsgOperation::Additive, 0, 0);
        assert_eq!(brush.face_polygons.len(), 6);
        for face in &brush.face_polygons {
            assert!((face.area() - 1.0).abs() < 1e-9);
            assert!(face.is_convex(EPSILON));
            assert_eq!(face.vertices.len(), 4);
        }
    }

    #[test]
    fn face_vertices_lie_on_every_brush_plane_within_tolerance() {
        let planes = box_planes(Point3::new(1.0, 0.0, 0.0), 0.5);
        let brush: Brush<i32> =
            Brush::from_planes(planes.clone(), CsgOperation::Additive, 0, 0);
        for face in &brush.face_polygons {
            for v in &face.vertices {
                for plane in &planes {
                    assert!(plane.signed_distance(&v.pos) <= EPSILON_INSIDE + 1e-9);
                }
            }
        }
    }

    #[test]
    fn try_from_planes_rejects_fewer_than_four_planes() {
        let planes = vec![
            Plane::new(1.0, 0.0, 0.0, 0.0),
            Plane::new(0.0, 1.0, 0.0, 0.0),
            Plane::new(0.0, 0.0, 1.0, 0.0),
        ];
        let result: Result<Brush<i32>, _> =
            Brush::try_from_planes(planes, CsgOperation::Additive, 0, 0);
        assert_eq!(result.unwrap_err(), crate::errors::CsgError::InsufficientPlanes(3));
    }

    #[test]
    fn underdetermined_plane_set_yields_no_faces() {
        // Only 3 planes: no bounded polytope, so no face can collect 3
        // unique accepted points for any other plane pair/triple beyond
        // itself.
        let planes = vec![
            Plane::new(1.0, 0.0, 0.0, 0.0),
            Plane::new(0.0, 1.0, 0.0, 0.0),
            Plane::new(0.0, 0.0, 1.0, 0.0),
        ];
        let brush: Brush<i32> = Brush::from_planes(planes, CsgOperation::Additive, 0, 0);
        assert!(brush.face_polygons.is_empty());
    }
}
