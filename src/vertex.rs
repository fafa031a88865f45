//! A single vertex of a [`crate::polygon::Polygon`]: position, normal,
//! and UV coordinates, with the flip/interpolate operations the
//! splitter and brush constructor need. Interpolation is linear, not
//! spherical — the splitter only ever crosses straight plane-polygon
//! edges.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Position, unit normal, and UV of a polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: (Real, Real),
}

impl Vertex {
    #[inline]
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>, uv: (Real, Real)) -> Self {
        Self { pos, normal, uv }
    }

    /// Flip negates the normal; position and UV are unaffected.
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation between `self` (`t = 0`) and `other`
    /// (`t = 1`); the normal is re-normalised after interpolating since
    /// a lerp of two unit vectors is not itself unit length.
    pub fn interpolate(&self, other: &Self, t: Real) -> Self {
        let pos = self.pos + (other.pos - self.pos) * t;
        let normal_lerp = self.normal + (other.normal - self.normal) * t;
        let normal = if normal_lerp.norm_squared() > Real::EPSILON {
            normal_lerp.normalize()
        } else {
            normal_lerp
        };
        let uv = (
            self.uv.0 + (other.uv.0 - self.uv.0) * t,
            self.uv.1 + (other.uv.1 - self.uv.1) * t,
        );
        Self { pos, normal, uv }
    }
}
