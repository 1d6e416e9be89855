/// Core domain types for read-only range resolution.
use serde::Deserialize;

/// A closed range of 1-based line numbers, both ends inclusive.
/// Only the normalizer, merger, and negator construct these, and they
/// guarantee `1 <= start <= end <= max_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Last line of the range (inclusive).
    pub end: u32,
    /// First line of the range (inclusive).
    pub start: u32,
}

impl Interval {
    /// Build an interval from its bounds.
    pub fn new(start: u32, end: u32) -> Self {
        return Self { end, start };
    }
}

/// The list wrapped by `readonly: { except: [...] }` — the listed ranges
/// are the *editable* exceptions and everything else is read-only.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExceptList {
    /// Ranges the student may edit.
    pub except: Vec<RawRangeItem>,
}

/// One raw entry in a read-only range list: a single signed line index or
/// a `{from, to}` pair. Positive indices are 1-based from the start of the
/// file; negative indices count from the end (`-1` is the last line).
/// Zero is never a valid index.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawRangeItem {
    /// A single line index, standing for `from = to = v`.
    Line(i64),
    /// An explicit pair; either end may be omitted.
    Span(RangeSpan),
}

impl RawRangeItem {
    /// The raw `(from, to)` bounds before resolution.
    pub fn bounds(&self) -> (i64, i64) {
        return match *self {
            RawRangeItem::Line(v) => (v, v),
            RawRangeItem::Span(RangeSpan { from, to }) => (from, to),
        };
    }
}

/// The author-facing `readonly` field of a skeleton file. An absent field
/// (handled as `Option` by the widget model) means fully editable.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawRangeSpec {
    /// The whole file is (or is not) read-only.
    AllOrNothing(bool),
    /// The listed ranges are read-only.
    ItemList(Vec<RawRangeItem>),
    /// The listed ranges are editable; everything else is read-only.
    Negated(ExceptList),
}

/// A `{from, to}` pair. `from` falls back to the first line of the file,
/// `to` to the last, so either end may be omitted.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RangeSpan {
    /// First line of the range. Defaults to the start of the file.
    #[serde(default = "default_from")]
    pub from: i64,
    /// Last line of the range. Defaults to the end of the file.
    #[serde(default = "default_to")]
    pub to: i64,
}

/// Canonical output of read-only resolution: a boolean passthrough or a
/// sorted, disjoint, non-adjacent interval list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedReadOnly {
    /// Whole-file passthrough from a boolean spec.
    All(bool),
    /// Canonical read-only interval set.
    Ranges(Vec<Interval>),
}

fn default_from() -> i64 {
    return 1;
}

fn default_to() -> i64 {
    return -1;
}
