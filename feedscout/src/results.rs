//! Search result types.
//!
//! A [`Match`] is created by a matcher, moved into the result channel by a
//! worker, and consumed by the collector. Nothing holds on to it afterwards.
use std::fmt;

/// A single field of a feed item that matched the search term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    /// Which part of the item matched, e.g. "Title" or "Description"
    pub field: String,
    /// The full text of the matching field
    pub content: String,
}

impl Match {
    pub fn new(field: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            content: content.into(),
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\n{}\n", self.field, self.content)
    }
}

/// What a completed run reports back to its caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of feeds a worker was launched for
    pub feeds: usize,
    /// Number of results rendered by the collector
    pub delivered: usize,
}
