//! Per-build registry of widget ids.

use std::collections::HashSet;

use regex::Regex;

use crate::error::Error;

/// Tracks every widget id claimed during one build.
///
/// Ids double as HTML element ids, so they are restricted to
/// `[A-Za-z0-9_-]+` and must be unique across the whole book. The
/// registry is passed explicitly through the build; independent runs
/// never share identifier state.
pub struct IdRegistry {
    /// Ids claimed so far.
    claimed: HashSet<String>,
    /// Allowed id shape.
    pattern: Regex,
}

impl Default for IdRegistry {
    fn default() -> Self {
        return Self::new();
    }
}

impl IdRegistry {
    /// Create an empty registry.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded id regex is invalid (compile-time invariant).
    pub fn new() -> Self {
        return Self {
            claimed: HashSet::new(),
            pattern: Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"),
        };
    }

    /// Validate an id and record it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWidgetId` for a malformed id, or
    /// `Error::DuplicateWidgetId` if it was already claimed this build.
    pub fn claim(&mut self, id: &str) -> Result<(), Error> {
        if !self.pattern.is_match(id) {
            return Err(Error::InvalidWidgetId { id: id.to_string() });
        }
        if !self.claimed.insert(id.to_string()) {
            return Err(Error::DuplicateWidgetId { id: id.to_string() });
        }
        return Ok(());
    }

    /// Number of widgets claimed so far.
    pub fn count(&self) -> usize {
        return self.claimed.len();
    }
}
