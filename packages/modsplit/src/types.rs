//! Core data types for the splitter.
//!
//! A [`SourceDocument`] goes in, a [`SplitOutput`] of composed [`Unit`]s
//! comes out. Everything in between is derived and transient.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::splitting::Block;

/// The document being split.
///
/// Immutable once loaded; the engine only ever reads slices of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    name: String,
    text: String,
}

impl SourceDocument {
    /// Create a document from an identifying name and its full text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Identifying name (usually the path the text was read from).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the document has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Read-only view of a byte range.
    ///
    /// Returns `None` when the range is out of bounds or does not fall on
    /// UTF-8 character boundaries.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }
}

/// A fully composed output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Unit name (module name, file stem on disk).
    pub name: String,

    /// Final text: header, blank line, content, single trailing newline.
    pub body: String,
}

impl Unit {
    /// Create a new unit.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// File name for this unit with the given extension (`cache` → `cache.rs`).
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.name)
    }
}

/// The complete result of a successful split run.
///
/// Only ever constructed once every unit, including the aggregator, has been
/// composed.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// Units in declaration order, aggregator last.
    pub units: Vec<Unit>,

    /// Name of the aggregator unit.
    pub aggregator: String,

    /// Resolved blocks, kept for diagnostics.
    pub blocks: Vec<Block>,
}

impl SplitOutput {
    /// Look up a unit by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    /// The aggregator unit.
    #[must_use]
    pub fn aggregator_unit(&self) -> Option<&Unit> {
        self.get(&self.aggregator)
    }

    /// Unit names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.name.as_str())
    }

    /// Number of units, aggregator included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether there are no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Convert into a name → body mapping.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.units.into_iter().map(|u| (u.name, u.body)).collect()
    }
}
