//! Construction-boundary errors.
//!
//! The core entry point, [`crate::chain::process`], never fails:
//! degenerate input is dropped silently and processing continues.
//! `CsgError` is for the constructors a caller invokes directly — building
//! a [`crate::plane::Plane`] from points or a [`crate::brush::Brush`]
//! from a plane set — which can observe a bad input at the point of
//! construction rather than discovering it three steps later as an
//! empty result.

use crate::float_types::Real;
use nalgebra::Point3;

/// Errors surfaced at brush/plane construction boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum CsgError {
    /// A plane was constructed from a near-zero, non-finite, or
    /// colinear normal.
    DegenerateNormal,
    /// A brush was given fewer than the four planes needed to bound a
    /// polytope.
    InsufficientPlanes(usize),
    /// A coordinate was NaN or infinite.
    NonFiniteCoordinate(Point3<Real>),
    /// Anything else.
    Other(String),
}

impl std::fmt::Display for CsgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CsgError::*;
        match self {
            DegenerateNormal => {
                write!(f, "plane normal is near-zero, non-finite, or points are colinear")
            },
            InsufficientPlanes(n) => {
                write!(f, "brush has {n} planes, at least 4 are required")
            },
            NonFiniteCoordinate(p) => write!(f, "non-finite coordinate: {p}"),
            Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CsgError {}
