//! Interval merging and negation over read-only line sets.
//!
//! Canonical form: sorted ascending by start, pairwise disjoint, and
//! non-adjacent — no two intervals satisfy `a.end + 1 == b.start`.

use crate::types::Interval;

/// Sort and fully coalesce intervals into minimal canonical form.
///
/// The sweep folds every following interval whose start is at most one
/// line past the current end, so chains of three or more mutually
/// overlapping or adjacent ranges collapse into a single interval
/// regardless of input order. Folding only one neighbor per step would
/// leave such chains un-merged.
pub fn merge(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by_key(|iv| return (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for next in intervals {
        match merged.last_mut() {
            Some(current) if next.start <= current.end.saturating_add(1) => {
                current.end = current.end.max(next.end);
            },
            _ => merged.push(next),
        }
    }
    return merged;
}

/// Complement of a canonical interval set over `[1, max_line]`.
///
/// Walks the input left to right emitting the gaps between intervals,
/// then the trailing gap up to `max_line`. An empty input negates to the
/// whole file; an input covering the whole file negates to nothing.
pub fn negate(ranges: &[Interval], max_line: u32) -> Vec<Interval> {
    let mut negated = Vec::new();
    let mut cursor = 1_u32;

    for range in ranges {
        if range.start > cursor {
            negated.push(Interval::new(cursor, range.start.saturating_sub(1)));
        }
        cursor = range.end.saturating_add(1);
    }

    if cursor <= max_line {
        negated.push(Interval::new(cursor, max_line));
    }
    return negated;
}
