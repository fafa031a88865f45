//! Convex polygon: an ordered ring of vertices on a supporting plane,
//! plus a material tag. No triangulation or subdivision here — those
//! belong to a meshing stage downstream of this evaluator.

use crate::float_types::{EPSILON_AREA, Real};
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// An ordered ring of `≥3` vertices lying on `plane`, tagged with a
/// material. `S` is the material-tag type; the crate's own tests
/// instantiate it as `i32`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub material: S,
}

impl<S: Clone> Polygon<S> {
    /// Build a polygon on an explicit supporting plane. The plane is
    /// never re-derived from `vertices`: every caller in this crate
    /// already knows the plane a fragment belongs to (the owning
    /// brush's plane, or the plane inherited from the polygon being
    /// split), and re-deriving it from a possibly-degenerate vertex
    /// subset would be both wasteful and less robust.
    pub fn new(vertices: Vec<Vertex>, plane: Plane, material: S) -> Self {
        Self {
            vertices,
            plane,
            material,
        }
    }

    /// Reverses winding, flips every vertex normal, and flips the
    /// supporting plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane = self.plane.flip();
    }

    /// Centroid of the vertex ring (arithmetic mean of positions), used
    /// by [`crate::relations::categorize_polygon`] instead of any
    /// single vertex: vertices on a neighbour's edge or corner can
    /// coincidentally lie exactly on one of its faces, which would make
    /// a vertex-based majority rule misclassify.
    pub fn centroid(&self) -> Point3<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Polygon area via the standard cross-product fan formula about
    /// the centroid; robust for any convex (or near-planar) ring.
    pub fn area(&self) -> Real {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let centroid = self.centroid();
        let mut acc = Vector3::zeros();
        for i in 0..n {
            let a = self.vertices[i].pos - centroid;
            let b = self.vertices[(i + 1) % n].pos - centroid;
            acc += a.cross(&b);
        }
        0.5 * acc.norm()
    }

    /// A polygon is degenerate (and must be discarded before emission)
    /// if it has fewer than three vertices or its area is below
    /// [`EPSILON_AREA`].
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.area() < EPSILON_AREA
    }

    /// Walks the ring and checks that every pair of consecutive edge
    /// cross products lies on the same side of the supporting plane's
    /// normal.
    pub fn is_convex(&self, eps: Real) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let normal = self.plane.normal();
        let mut sign = 0i8;
        for i in 0..n {
            let prev = self.vertices[(i + n - 1) % n].pos;
            let curr = self.vertices[i].pos;
            let next = self.vertices[(i + 1) % n].pos;
            let e1 = curr - prev;
            let e2 = next - curr;
            let cross = e1.cross(&e2);
            let proj = cross.dot(&normal);
            if proj.abs() < eps {
                continue; // colinear edge pair, not a sign violation
            }
            let this_sign = if proj > 0.0 { 1 } else { -1 };
            if sign == 0 {
                sign = this_sign;
            } else if sign != this_sign {
                return false;
            }
        }
        true
    }

    /// Axis-aligned bounding box of the vertex ring. `None` only for a
    /// polygon with no vertices, which never occurs for a
    /// non-degenerate polygon.
    pub fn bounding_box(&self) -> Option<crate::aabb::Aabb> {
        crate::aabb::Aabb::from_points(self.vertices.iter().map(|v| v.pos))
    }
}
