//! The chain evaluator: the top-level driver that turns an ordered
//! list of brushes into the flat polygon list of their boolean
//! combination.
//!
//! The per-owner split/classify/emit loop below does not build a BSP
//! tree per operand pair the way a conventional boolean combinator
//! does; it walks a per-brush plane chain once per owner instead. Its
//! idiom (borrow the input slice immutably, build one output `Vec` per
//! owner, concatenate at the end) is a serial per-item loop with an
//! optional `rayon`-backed parallel iterator gated behind the
//! `parallel` feature.

use crate::Diagnostics;
use crate::aabb::Aabb;
use crate::brush::{Brush, CsgOperation};
use crate::float_types::EPSILON;
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::relations::{PolygonCategory, brushes_overlap, categorize_polygon};

/// Run the core evaluator: split every owner's faces against
/// overlapping brushes, classify and resolve coplanar conflicts,
/// evaluate the boolean chain on both sides of each surviving
/// fragment, and emit kept/flipped fragments.
///
/// `brushes` must already be sorted by chain order; this function does
/// not sort them. Pure: no I/O, no shared mutable state, no panics on
/// well-formed input.
pub fn process<S: Clone + Send + Sync>(brushes: &[Brush<S>]) -> Vec<Polygon<S>> {
    // Short circuits.
    match brushes.len() {
        0 => return Vec::new(),
        1 => {
            return if brushes[0].operation == CsgOperation::Additive {
                brushes[0].face_polygons.clone()
            } else {
                Vec::new()
            };
        },
        _ => {},
    }

    let overlap = overlap_matrix(brushes);

    // Per-owner loop. Each owner reads only the immutable input slice
    // and the precomputed overlap matrix and writes to its own
    // fragment buffer, so this fans out cleanly under the `parallel`
    // feature.
    #[cfg(not(feature = "parallel"))]
    let output: Vec<Polygon<S>> = brushes
        .iter()
        .enumerate()
        .flat_map(|(owner_index, owner)| process_owner(brushes, &overlap, owner_index, owner).0)
        .collect();

    #[cfg(feature = "parallel")]
    let output: Vec<Polygon<S>> = {
        use rayon::prelude::*;
        brushes
            .par_iter()
            .enumerate()
            .flat_map_iter(|(owner_index, owner)| process_owner(brushes, &overlap, owner_index, owner).0)
            .collect()
    };

    output
}

/// As [`process`], but also returns [`Diagnostics`] tallying why
/// fragments were dropped. Always serial: diagnostics are additive
/// instrumentation over the core algorithm, not a hot path the
/// `parallel` feature needs to cover.
pub fn process_with_diagnostics<S: Clone>(brushes: &[Brush<S>]) -> (Vec<Polygon<S>>, Diagnostics) {
    match brushes.len() {
        0 => return (Vec::new(), Diagnostics::default()),
        1 => {
            let polys = if brushes[0].operation == CsgOperation::Additive {
                brushes[0].face_polygons.clone()
            } else {
                Vec::new()
            };
            return (polys, Diagnostics::default());
        },
        _ => {},
    }

    let overlap = overlap_matrix(brushes);

    let mut output = Vec::new();
    let mut diagnostics = Diagnostics::default();
    for (owner_index, owner) in brushes.iter().enumerate() {
        let (polys, diag) = process_owner(brushes, &overlap, owner_index, owner);
        output.extend(polys);
        diagnostics.degenerate_fragments_dropped += diag.degenerate_fragments_dropped;
        diagnostics.coplanar_fragments_superseded += diag.coplanar_fragments_superseded;
        diagnostics.interior_or_vacuum_fragments_discarded +=
            diag.interior_or_vacuum_fragments_discarded;
    }
    (output, diagnostics)
}

/// Build the symmetric pairwise overlap matrix. `overlap[i][i]` is
/// never read. Each pair is pre-filtered by its bounding boxes before
/// paying for the exact separating-plane test: a brush with no faces
/// has no box and is treated as non-overlapping with everything
/// without even reaching [`brushes_overlap`].
fn overlap_matrix<S: Clone>(brushes: &[Brush<S>]) -> Vec<Vec<bool>> {
    let n = brushes.len();
    let boxes: Vec<Option<Aabb>> = brushes.iter().map(Brush::bounding_box).collect();
    let mut overlap = vec![vec![false; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let boxes_overlap = match (boxes[i], boxes[j]) {
                (Some(a), Some(b)) => a.intersects(&b),
                _ => false,
            };
            let o = boxes_overlap && brushes_overlap(&brushes[i], &brushes[j]);
            overlap[i][j] = o;
            overlap[j][i] = o;
        }
    }
    overlap
}

/// The per-owner body: split every face of `owner` against its
/// overlapping neighbours' planes, classify, tiebreak, and decide
/// keep/flip/discard for each surviving fragment.
fn process_owner<S: Clone>(
    brushes: &[Brush<S>],
    overlap: &[Vec<bool>],
    owner_index: usize,
    owner: &Brush<S>,
) -> (Vec<Polygon<S>>, Diagnostics) {
    // Overlapping set and the concatenated splitting-plane list.
    let overlapping: Vec<usize> = (0..brushes.len())
        .filter(|&j| j != owner_index && overlap[owner_index][j])
        .collect();
    let splitting_planes: Vec<Plane> = overlapping
        .iter()
        .flat_map(|&j| brushes[j].world_planes.iter().copied())
        .collect();

    let mut kept = Vec::new();
    let mut diagnostics = Diagnostics::default();
    for face in &owner.face_polygons {
        // Iteratively split against every plane, retaining every
        // surviving bucket at each step.
        let mut fragments = vec![face.clone()];
        for plane in &splitting_planes {
            let mut next = Vec::with_capacity(fragments.len());
            for fragment in fragments {
                let split = plane.split(&fragment, EPSILON);
                next.extend(split.front);
                next.extend(split.back);
                next.extend(split.coplanar_front);
                next.extend(split.coplanar_back);
            }
            fragments = next;
        }
        let before = fragments.len();
        fragments.retain(|f| !f.is_degenerate());
        diagnostics.degenerate_fragments_dropped += before - fragments.len();

        for fragment in fragments {
            match emit_fragment(brushes, &overlapping, owner_index, owner, fragment) {
                Emission::Keep(polygon) => kept.push(polygon),
                Emission::SupersededByCoplanar => diagnostics.coplanar_fragments_superseded += 1,
                Emission::InteriorOrVacuum => {
                    diagnostics.interior_or_vacuum_fragments_discarded += 1
                },
            }
        }
    }
    (kept, diagnostics)
}

/// Why a fragment was or was not kept.
enum Emission<S: Clone> {
    Keep(Polygon<S>),
    SupersededByCoplanar,
    InteriorOrVacuum,
}

/// Classify a single fragment against every other brush, apply the
/// coplanar tiebreaker, evaluate the boolean chain on both sides, and
/// decide keep/flip/discard.
fn emit_fragment<S: Clone>(
    brushes: &[Brush<S>],
    overlapping: &[usize],
    owner_index: usize,
    _owner: &Brush<S>,
    fragment: Polygon<S>,
) -> Emission<S> {
    let n = brushes.len();

    // Category of the fragment against every other brush.
    let categories: Vec<PolygonCategory> = (0..n)
        .map(|j| {
            if j == owner_index {
                // placeholder, overwritten by the per-side vectors below
                PolygonCategory::Inside
            } else if !overlapping.contains(&j) {
                PolygonCategory::Outside
            } else {
                categorize_polygon(&fragment, &brushes[j].world_planes)
            }
        })
        .collect();

    // Coplanar tiebreaker — a later brush's own face claims this
    // surface, so the earlier owner's coincident fragment is dropped.
    let superseded = (owner_index + 1..n).any(|j| {
        matches!(
            categories[j],
            PolygonCategory::Aligned | PolygonCategory::ReverseAligned
        )
    });
    if superseded {
        return Emission::SupersededByCoplanar;
    }

    // Two-sided boolean vectors.
    let mut front_inside = vec![false; n];
    let mut back_inside = vec![true; n];
    for j in 0..n {
        if j == owner_index {
            front_inside[j] = false;
            back_inside[j] = true;
            continue;
        }
        match categories[j] {
            PolygonCategory::Inside => {
                front_inside[j] = true;
                back_inside[j] = true;
            },
            PolygonCategory::Outside => {
                front_inside[j] = false;
                back_inside[j] = false;
            },
            PolygonCategory::Aligned => {
                front_inside[j] = false;
                back_inside[j] = true;
            },
            PolygonCategory::ReverseAligned => {
                front_inside[j] = true;
                back_inside[j] = false;
            },
        }
    }

    // Evaluate the boolean chain on each side.
    let front_solid = evaluate_chain(brushes, &front_inside);
    let back_solid = evaluate_chain(brushes, &back_inside);

    // Emission decision.
    let mut fragment = fragment;
    if !front_solid && back_solid {
        Emission::Keep(fragment)
    } else if front_solid && !back_solid {
        fragment.flip();
        Emission::Keep(fragment)
    } else {
        Emission::InteriorOrVacuum
    }
}

/// Fold the per-brush interior indicator `vec` into a single
/// solid/empty state using each brush's operation, in chain order: `∨`
/// for Additive, `∧¬` for Subtractive, `∧` for Intersect.
fn evaluate_chain<S: Clone>(brushes: &[Brush<S>], vec: &[bool]) -> bool {
    let mut solid = false;
    for (brush, &inside) in brushes.iter().zip(vec.iter()) {
        solid = match brush.operation {
            CsgOperation::Additive => solid || inside,
            CsgOperation::Subtractive => solid && !inside,
            CsgOperation::Intersect => solid && inside,
        };
    }
    solid
}
