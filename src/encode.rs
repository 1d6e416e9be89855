//! HTML attribute encoding for client-side widget parameters.
//!
//! Values are serialized as JSON, then base64-encoded so they can sit in
//! an attribute value without any character escaping. The client decoder
//! reverses both steps.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::types::ResolvedReadOnly;

/// Serialize a value as JSON and base64-encode it.
pub fn attr<T: Serialize>(value: &T) -> String {
    // Widget parameter types serialize infallibly.
    let json = serde_json::to_string(value).unwrap_or_default();
    return STANDARD.encode(json.as_bytes());
}

/// The `data-readonly` attribute value for a resolved read-only set, or
/// `None` when the attribute must be omitted entirely.
///
/// `All(false)` and an absent spec both mean "fully editable" and render
/// as no attribute; `All(true)` is the literal boolean; interval lists
/// encode as JSON pairs `[[start, end], ...]`.
pub fn readonly_attr(resolved: &ResolvedReadOnly) -> Option<String> {
    return match resolved {
        ResolvedReadOnly::All(false) => None,
        ResolvedReadOnly::All(true) => Some("true".to_string()),
        ResolvedReadOnly::Ranges(ranges) => {
            let pairs: Vec<[u32; 2]> = ranges.iter().map(|iv| return [iv.start, iv.end]).collect();
            Some(attr(&pairs))
        },
    };
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::types::Interval;

    fn decode(encoded: &str) -> String {
        let bytes = STANDARD.decode(encoded).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn ranges_encode_as_json_pairs() {
        let resolved =
            ResolvedReadOnly::Ranges(vec![Interval::new(1, 1), Interval::new(5, 10)]);
        let encoded = readonly_attr(&resolved).unwrap();
        assert_eq!(decode(&encoded), "[[1,1],[5,10]]");
    }

    #[test]
    fn fully_readonly_is_the_literal_boolean() {
        assert_eq!(readonly_attr(&ResolvedReadOnly::All(true)).as_deref(), Some("true"));
    }

    #[test]
    fn fully_editable_omits_the_attribute() {
        assert_eq!(readonly_attr(&ResolvedReadOnly::All(false)), None);
    }

    #[test]
    fn empty_range_set_still_encodes() {
        let encoded = readonly_attr(&ResolvedReadOnly::Ranges(Vec::new())).unwrap();
        assert_eq!(decode(&encoded), "[]");
    }
}
