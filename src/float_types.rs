//! Scalar type and tolerance constants shared by every component.
//!
//! All tolerances are tuned for world scales in the range `10⁻² … 10³`;
//! outside that range callers should rescale geometry rather than the
//! constants.

/// The scalar type used throughout the crate. Plane arithmetic is
/// always performed in doubles regardless of this alias; vertex
/// positions share the same type since a single `Real` alias is the
/// idiomatic Rust rendition of "floats that happen to be doubles".
pub type Real = f64;

/// Archimedes' constant (π).
pub const PI: Real = core::f64::consts::PI;

/// Plane-boundary epsilon: governs `classify_point`, `classify_polygon`,
/// and plane equality (`Plane::eq`).
pub const EPSILON: Real = 1e-5;

/// Acceptance tolerance for "inside every plane of the brush" tests
/// during three-plane-intersection vertex enumeration and the brush
/// overlap test. Deliberately larger than [`EPSILON`] so that vertices
/// lying exactly on a shared face are still accepted.
pub const EPSILON_INSIDE: Real = 1e-4;

/// Minimum polygon area; below this a polygon is degenerate and must
/// be discarded before emission.
pub const EPSILON_AREA: Real = 1e-6;

/// Minimum |determinant| for a three-plane intersection to be
/// considered solvable.
pub const EPSILON_DETERMINANT: Real = 1e-10;

/// Squared tolerance used to deduplicate a face's candidate vertex
/// bucket.
pub const EPSILON_DEDUP_SQUARED: Real = 1e-8;
