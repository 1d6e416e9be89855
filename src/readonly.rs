//! Read-only range resolution for skeleton source files.
//!
//! Turns the author-supplied `readonly` specification — possibly sparse,
//! negative-indexed, or inverted through `except` — into the canonical
//! interval set the client-side editor enforces.

use crate::error::Error;
use crate::interval;
use crate::types::{Interval, RawRangeItem, RawRangeSpec, ResolvedReadOnly};

/// Number of lines in a source file: one more than the newline count, so
/// a file without a trailing newline still has its last line counted.
pub fn line_count(data: &str) -> u32 {
    let newlines = data.matches('\n').count();
    return u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1);
}

/// Normalize every raw item against the file length.
fn normalize_all(
    items: &[RawRangeItem],
    max_line: u32,
    filename: &str,
) -> Result<Vec<Interval>, Error> {
    return items
        .iter()
        .map(|item| return normalize_item(item, max_line, filename))
        .collect();
}

/// Resolve one raw item into a clamped, ordered interval.
///
/// A single integer stands for `from = to = v`; bounds resolve
/// independently, and an inverted pair is swapped so authors may write
/// ranges in either order.
fn normalize_item(item: &RawRangeItem, max_line: u32, filename: &str) -> Result<Interval, Error> {
    let (from, to) = item.bounds();
    let start = resolve_bound(from, max_line, filename)?;
    let end = resolve_bound(to, max_line, filename)?;

    if start > end {
        return Ok(Interval::new(end, start));
    }
    return Ok(Interval::new(start, end));
}

/// Resolve a raw specification against a file of `max_line` lines.
///
/// Boolean specs pass through without touching interval computation.
/// An item list normalizes and merges into canonical form; an `except`
/// list is additionally negated so the listed ranges become the editable
/// exceptions. Input shape is already pinned down by the widget model, so
/// anything else reaching this point is a bug, not an author error.
///
/// # Errors
///
/// Returns `Error::InvalidRangeBound` for a bound of zero or one that
/// resolves below the first line.
pub fn resolve(
    filename: &str,
    spec: &RawRangeSpec,
    max_line: u32,
) -> Result<ResolvedReadOnly, Error> {
    return match spec {
        RawRangeSpec::AllOrNothing(flag) => Ok(ResolvedReadOnly::All(*flag)),
        RawRangeSpec::ItemList(items) => {
            let merged = interval::merge(normalize_all(items, max_line, filename)?);
            Ok(ResolvedReadOnly::Ranges(merged))
        },
        RawRangeSpec::Negated(list) => {
            let merged = interval::merge(normalize_all(&list.except, max_line, filename)?);
            Ok(ResolvedReadOnly::Ranges(interval::negate(&merged, max_line)))
        },
    };
}

/// Resolve one signed bound to an absolute 1-based line number.
///
/// Negative values count from the end of the file (`-1` is the last
/// line). Values past the end clamp down to `max_line`; there is no
/// upward clamp — zero and values resolving below line 1 are rejected.
fn resolve_bound(value: i64, max_line: u32, filename: &str) -> Result<u32, Error> {
    if value == 0 {
        return Err(Error::InvalidRangeBound {
            filename: filename.to_string(),
            value,
        });
    }

    let absolute = if value < 0 {
        i64::from(max_line).saturating_add(value).saturating_add(1)
    } else {
        value
    };

    if absolute < 1 {
        return Err(Error::InvalidRangeBound {
            filename: filename.to_string(),
            value,
        });
    }

    return Ok(u32::try_from(absolute).unwrap_or(u32::MAX).min(max_line));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::types::{ExceptList, RangeSpan};

    fn span(from: i64, to: i64) -> RawRangeItem {
        RawRangeItem::Span(RangeSpan { from, to })
    }

    fn ranges(resolved: ResolvedReadOnly) -> Vec<Interval> {
        match resolved {
            ResolvedReadOnly::Ranges(r) => r,
            ResolvedReadOnly::All(_) => panic!("expected ranges"),
        }
    }

    #[test]
    fn counts_last_line_without_trailing_newline() {
        assert_eq!(line_count("a\nb"), 2);
    }

    #[test]
    fn trailing_newline_counts_an_empty_final_line() {
        assert_eq!(line_count("a\nb\n"), 3);
    }

    #[test]
    fn single_line_file() {
        assert_eq!(line_count("just one"), 1);
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let got = normalize_item(&span(-3, -1), 10, "f").unwrap();
        assert_eq!(got, Interval::new(8, 10));
    }

    #[test]
    fn inverted_pair_is_swapped() {
        let got = normalize_item(&span(8, 3), 10, "f").unwrap();
        assert_eq!(got, Interval::new(3, 8));
    }

    #[test]
    fn oversized_bound_clamps_to_last_line() {
        let got = normalize_item(&span(1, 100), 5, "f").unwrap();
        assert_eq!(got, Interval::new(1, 5));
    }

    #[test]
    fn single_integer_is_a_one_line_range() {
        let got = normalize_item(&RawRangeItem::Line(4), 10, "f").unwrap();
        assert_eq!(got, Interval::new(4, 4));
    }

    #[test]
    fn zero_bound_is_rejected() {
        let err = normalize_item(&span(0, 3), 10, "f").unwrap_err();
        assert!(matches!(err, Error::InvalidRangeBound { value: 0, .. }));
    }

    #[test]
    fn bound_resolving_below_first_line_is_rejected() {
        let err = normalize_item(&RawRangeItem::Line(-100), 10, "f").unwrap_err();
        assert!(matches!(err, Error::InvalidRangeBound { value: -100, .. }));
    }

    #[test]
    fn boolean_spec_passes_through() {
        let got = resolve("f", &RawRangeSpec::AllOrNothing(true), 10).unwrap();
        assert_eq!(got, ResolvedReadOnly::All(true));
        let got = resolve("f", &RawRangeSpec::AllOrNothing(false), 10).unwrap();
        assert_eq!(got, ResolvedReadOnly::All(false));
    }

    #[test]
    fn item_list_merges_into_canonical_form() {
        let spec = RawRangeSpec::ItemList(vec![span(4, 6), RawRangeItem::Line(9), span(1, 3)]);
        let got = ranges(resolve("f", &spec, 10).unwrap());
        assert_eq!(got, vec![Interval::new(1, 6), Interval::new(9, 9)]);
    }

    #[test]
    fn except_list_negates_after_merging() {
        let spec = RawRangeSpec::Negated(ExceptList { except: vec![span(2, 4)] });
        let got = ranges(resolve("f", &spec, 10).unwrap());
        assert_eq!(got, vec![Interval::new(1, 1), Interval::new(5, 10)]);
    }

    #[test]
    fn except_covering_whole_file_leaves_nothing_readonly() {
        let spec = RawRangeSpec::Negated(ExceptList { except: vec![span(1, -1)] });
        let got = ranges(resolve("f", &spec, 10).unwrap());
        assert_eq!(got, Vec::new());
    }
}
