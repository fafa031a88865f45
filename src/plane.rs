//! Oriented half-space planes: distance queries, point/polygon
//! classification, and the Sutherland–Hodgman-style polygon splitter
//! that the brush geometry and chain evaluator build on.
//!
//! Planes here carry their coefficients directly (`A·x+B·y+C·z+D=0`)
//! rather than three defining points, since the evaluator is driven by
//! brush plane *sets*, not per-face triangles.

use crate::errors::CsgError;
use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// Classification of a polygon relative to a plane: bitwise-OR of the
/// per-vertex classifications. `COPLANAR` (0) means every vertex lies
/// on the plane; `SPANNING` (3) means vertices were seen on both
/// sides.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Classification of a single point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    Front,
    Back,
    OnPlane,
}

/// An oriented half-space `A·x + B·y + C·z + D = 0` with `|(A,B,C)| = 1`.
/// The front half-space is `A·x+B·y+C·z+D > 0`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub a: Real,
    pub b: Real,
    pub c: Real,
    pub d: Real,
}

impl PartialEq for Plane {
    /// `P == P′` iff all four components agree within [`EPSILON`].
    fn eq(&self, other: &Self) -> bool {
        (self.a - other.a).abs() < EPSILON
            && (self.b - other.b).abs() < EPSILON
            && (self.c - other.c).abs() < EPSILON
            && (self.d - other.d).abs() < EPSILON
    }
}

impl Plane {
    /// Build a plane directly from normalised coefficients. Intended
    /// for callers that already have a unit normal and offset; prefer
    /// [`Plane::from_points`] or [`Plane::from_normal`] otherwise.
    pub const fn new(a: Real, b: Real, c: Real, d: Real) -> Self {
        Self { a, b, c, d }
    }

    /// Construct a plane through three points, normal given by
    /// `normalize((b-a) × (c-a))`. Fails if the points are colinear or
    /// coincident, so that callers able to distinguish the failure may
    /// do so rather than silently receiving a sentinel.
    pub fn from_points(p0: Point3<Real>, p1: Point3<Real>, p2: Point3<Real>) -> Result<Self, CsgError> {
        for p in [p0, p1, p2] {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(CsgError::NonFiniteCoordinate(p));
            }
        }
        let normal = (p1 - p0).cross(&(p2 - p0));
        let len = normal.norm();
        if len < EPSILON {
            return Err(CsgError::DegenerateNormal);
        }
        let unit = normal / len;
        let d = -unit.dot(&p0.coords);
        Ok(Self {
            a: unit.x,
            b: unit.y,
            c: unit.z,
            d,
        })
    }

    /// Construct a plane from a (not necessarily unit) normal and a
    /// signed offset in the sense `n · p + offset == 0`. Fails on a
    /// near-zero normal.
    pub fn from_normal(normal: Vector3<Real>, offset: Real) -> Result<Self, CsgError> {
        let len = normal.norm();
        if !len.is_finite() || len < EPSILON || !offset.is_finite() {
            return Err(CsgError::DegenerateNormal);
        }
        let unit = normal / len;
        Ok(Self {
            a: unit.x,
            b: unit.y,
            c: unit.z,
            d: offset / len,
        })
    }

    /// Unit normal `(A, B, C)`.
    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// `A·x + B·y + C·z + D`, computed in doubles.
    #[inline]
    pub fn signed_distance(&self, p: &Point3<Real>) -> Real {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Classify a point against the plane with tolerance `eps`:
    /// `Front` iff `d > eps`, `Back` iff `d < -eps`, else `OnPlane`.
    #[inline]
    pub fn classify_point(&self, p: &Point3<Real>, eps: Real) -> PointSide {
        let d = self.signed_distance(p);
        if d > eps {
            PointSide::Front
        } else if d < -eps {
            PointSide::Back
        } else {
            PointSide::OnPlane
        }
    }

    /// Aggregate vertex classification of a polygon: bitwise-OR of
    /// each vertex's [`FRONT`]/[`BACK`]/[`COPLANAR`] bit, so the result
    /// is `SPANNING` iff vertices were seen on both sides.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>, eps: Real) -> i8 {
        polygon
            .vertices
            .iter()
            .map(|v| match self.classify_point(&v.pos, eps) {
                PointSide::Front => FRONT,
                PointSide::Back => BACK,
                PointSide::OnPlane => COPLANAR,
            })
            .fold(COPLANAR, |acc, bit| acc | bit)
    }

    /// `(−A,−B,−C,−D)`.
    #[inline]
    pub const fn flip(&self) -> Self {
        Self {
            a: -self.a,
            b: -self.b,
            c: -self.c,
            d: -self.d,
        }
    }

    /// Result of splitting a single polygon against this plane: each
    /// bucket holds at most one polygon since the input is a single
    /// convex ring.
    pub fn split<S: Clone>(&self, polygon: &Polygon<S>, eps: Real) -> Split<S> {
        let normal = self.normal();
        let types: Vec<PointSide> = polygon
            .vertices
            .iter()
            .map(|v| self.classify_point(&v.pos, eps))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, t| {
            acc
                | match t {
                    PointSide::Front => FRONT,
                    PointSide::Back => BACK,
                    PointSide::OnPlane => COPLANAR,
                }
        });

        match polygon_type {
            COPLANAR => {
                if normal.dot(&polygon.plane.normal()) > 0.0 {
                    Split {
                        coplanar_front: Some(polygon.clone()),
                        ..Split::empty()
                    }
                } else {
                    Split {
                        coplanar_back: Some(polygon.clone()),
                        ..Split::empty()
                    }
                }
            },
            FRONT => Split {
                front: Some(polygon.clone()),
                ..Split::empty()
            },
            BACK => Split {
                back: Some(polygon.clone()),
                ..Split::empty()
            },
            _ => {
                let n = polygon.vertices.len();
                let mut front_verts = Vec::<Vertex>::new();
                let mut back_verts = Vec::<Vertex>::new();

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (type_i, type_j) = (types[i], types[j]);
                    let (vi, vj) = (&polygon.vertices[i], &polygon.vertices[j]);

                    if type_i != PointSide::Back {
                        front_verts.push(*vi);
                    }
                    if type_i != PointSide::Front {
                        back_verts.push(*vi);
                    }

                    let spans = matches!(
                        (type_i, type_j),
                        (PointSide::Front, PointSide::Back)
                            | (PointSide::Back, PointSide::Front)
                    );
                    if spans {
                        let di = self.signed_distance(&vi.pos);
                        let dj = self.signed_distance(&vj.pos);
                        let denom = di - dj;
                        if denom.abs() > EPSILON {
                            let t = (di / denom).clamp(0.0, 1.0);
                            let crossing = vi.interpolate(vj, t);
                            front_verts.push(crossing);
                            back_verts.push(crossing);
                        }
                    }
                }

                let front = (front_verts.len() >= 3).then(|| {
                    Polygon::new(front_verts, polygon.plane, polygon.material.clone())
                });
                let back = (back_verts.len() >= 3).then(|| {
                    Polygon::new(back_verts, polygon.plane, polygon.material.clone())
                });

                Split {
                    front,
                    back,
                    ..Split::empty()
                }
            },
        }
    }
}

/// The four buckets a single polygon splits into against one plane.
/// At most one of `front`/`back` or `coplanar_front`/`coplanar_back` is
/// populated for a given input.
#[derive(Debug, Clone)]
pub struct Split<S: Clone> {
    pub front: Option<Polygon<S>>,
    pub back: Option<Polygon<S>>,
    pub coplanar_front: Option<Polygon<S>>,
    pub coplanar_back: Option<Polygon<S>>,
}

impl<S: Clone> Split<S> {
    const fn empty() -> Self {
        Self {
            front: None,
            back: None,
            coplanar_front: None,
            coplanar_back: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::Vertex;

    fn v(x: Real, y: Real, z: Real) -> Vertex {
        Vertex::new(Point3::new(x, y, z), Vector3::new(0.0, 0.0, 1.0), (0.0, 0.0))
    }

    #[test]
    fn signed_distance_matches_plane_equation() {
        let plane = Plane::new(0.0, 0.0, 1.0, -2.0); // z = 2
        assert!((plane.signed_distance(&Point3::new(0.0, 0.0, 5.0)) - 3.0).abs() < 1e-12);
        assert!((plane.signed_distance(&Point3::new(0.0, 0.0, 2.0))).abs() < 1e-12);
    }

    #[test]
    fn classify_point_respects_epsilon() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0); // z = 0
        assert_eq!(
            plane.classify_point(&Point3::new(0.0, 0.0, 1.0), EPSILON),
            PointSide::Front
        );
        assert_eq!(
            plane.classify_point(&Point3::new(0.0, 0.0, -1.0), EPSILON),
            PointSide::Back
        );
        assert_eq!(
            plane.classify_point(&Point3::new(0.0, 0.0, 0.0), EPSILON),
            PointSide::OnPlane
        );
    }

    #[test]
    fn from_points_rejects_colinear() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(2.0, 0.0, 0.0);
        assert!(Plane::from_points(p0, p1, p2).is_err());
    }

    #[test]
    fn from_points_rejects_non_finite_coordinate() {
        let p0 = Point3::new(Real::NAN, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(Plane::from_points(p0, p1, p2), Err(CsgError::NonFiniteCoordinate(p0)));
    }

    #[test]
    fn from_normal_rejects_near_zero_normal() {
        assert_eq!(
            Plane::from_normal(Vector3::new(0.0, 0.0, 0.0), 1.0),
            Err(CsgError::DegenerateNormal)
        );
    }

    #[test]
    fn flip_negates_all_components() {
        let plane = Plane::new(1.0, 0.0, 0.0, -3.0);
        let flipped = plane.flip();
        assert_eq!(flipped.a, -1.0);
        assert_eq!(flipped.d, 3.0);
    }

    #[test]
    fn split_spanning_polygon_yields_front_and_back() {
        let plane = Plane::new(1.0, 0.0, 0.0, 0.0); // x = 0
        let square: Vec<Vertex> = vec![
            v(-1.0, -1.0, 0.0),
            v(1.0, -1.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(-1.0, 1.0, 0.0),
        ];
        let square_plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        let polygon = Polygon::new(square, square_plane, 0);
        let split = plane.split(&polygon, EPSILON);
        assert!(split.front.is_some());
        assert!(split.back.is_some());
        assert!(split.coplanar_front.is_none());
        assert!(split.coplanar_back.is_none());
        assert_eq!(split.front.unwrap().vertices.len(), 4);
        assert_eq!(split.back.unwrap().vertices.len(), 4);
    }

    #[test]
    fn split_coplanar_polygon_goes_to_matching_bucket() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0); // z = 0
        let square: Vec<Vertex> = vec![
            v(-1.0, -1.0, 0.0),
            v(1.0, -1.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(-1.0, 1.0, 0.0),
        ];
        let polygon = Polygon::new(square, plane, 0);
        let split = plane.split(&polygon, EPSILON);
        assert!(split.coplanar_front.is_some());
        assert!(split.front.is_none() && split.back.is_none());
    }
}
