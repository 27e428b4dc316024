//! Types for the splitting system.

use std::ops::Range;

use serde::Deserialize;

use super::matcher::{LinePrefix, MarkerKey};
use crate::types::SourceDocument;

/// Which block a marker names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerRole {
    /// The marker opens the block that follows it.
    #[default]
    Start,

    /// The marker closes the block that precedes it.
    End,
}

/// Whether the matched key text belongs to a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerEdge {
    /// The matched text is cut out as a discard range.
    #[default]
    Exclusive,

    /// The matched text stays in the block the marker names.
    Inclusive,
}

/// Declarative description of a structural boundary point.
#[derive(Debug, Clone)]
pub struct Marker {
    /// Unique name within a split specification.
    pub name: String,

    /// What to search for.
    pub key: MarkerKey,

    /// Which block this marker names.
    pub role: MarkerRole,

    /// Whether the matched text is kept.
    pub edge: MarkerEdge,
}

impl Marker {
    /// Create a marker with the default role (`Start`) and edge (`Exclusive`).
    #[must_use]
    pub fn new(name: impl Into<String>, key: MarkerKey) -> Self {
        Self {
            name: name.into(),
            key,
            role: MarkerRole::default(),
            edge: MarkerEdge::default(),
        }
    }

    /// Literal marker named after its own text.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), MarkerKey::Literal(text))
    }

    /// Line-prefix marker named after its own text.
    #[must_use]
    pub fn line_prefix(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), MarkerKey::LinePrefix(LinePrefix(text)))
    }

    /// Rename the marker.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: MarkerRole) -> Self {
        self.role = role;
        self
    }

    /// Set the edge.
    #[must_use]
    pub fn with_edge(mut self, edge: MarkerEdge) -> Self {
        self.edge = edge;
        self
    }

    /// Shorthand for `with_edge(MarkerEdge::Inclusive)`.
    #[must_use]
    pub fn inclusive(self) -> Self {
        self.with_edge(MarkerEdge::Inclusive)
    }

    /// Shorthand for `with_role(MarkerRole::End)`.
    #[must_use]
    pub fn closing(self) -> Self {
        self.with_role(MarkerRole::End)
    }

    /// The cut this marker makes for a given match.
    ///
    /// Exclusive markers cut out the whole match; inclusive markers cut at
    /// the edge that keeps the match inside the block they name.
    #[must_use]
    pub fn cut(&self, matched: Range<usize>) -> Range<usize> {
        match (self.edge, self.role) {
            (MarkerEdge::Exclusive, _) => matched,
            (MarkerEdge::Inclusive, MarkerRole::Start) => matched.start..matched.start,
            (MarkerEdge::Inclusive, MarkerRole::End) => matched.end..matched.end,
        }
    }
}

/// A marker resolved against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Name of the marker that produced this boundary.
    pub marker: String,

    /// Role of that marker.
    pub role: MarkerRole,

    /// The cut: empty for inclusive markers, the matched text for exclusive ones.
    pub span: Range<usize>,
}

impl Boundary {
    /// Create a new boundary.
    #[must_use]
    pub fn new(marker: impl Into<String>, role: MarkerRole, span: Range<usize>) -> Self {
        Self {
            marker: marker.into(),
            role,
            span,
        }
    }

    /// Resolved offset: where the preceding block ends.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

/// Kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Text that units may claim.
    Content,

    /// Matched text of an exclusive marker, never part of a unit.
    Discard,
}

/// A half-open byte range of the document plus the labels it can be claimed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Byte range `[start, end)` in the document.
    pub range: Range<usize>,

    /// Labels this block can be referenced by.
    pub labels: Vec<String>,

    /// Content or discard.
    pub kind: BlockKind,
}

impl Block {
    /// Create a content block.
    #[must_use]
    pub fn content(range: Range<usize>, labels: Vec<String>) -> Self {
        Self {
            range,
            labels,
            kind: BlockKind::Content,
        }
    }

    /// Create a discard block.
    #[must_use]
    pub fn discard(range: Range<usize>, label: impl Into<String>) -> Self {
        Self {
            range,
            labels: vec![label.into()],
            kind: BlockKind::Discard,
        }
    }

    /// Whether the block carries the given label.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Raw, untrimmed text of the block.
    ///
    /// Blocks produced by the extractor always fall on character boundaries,
    /// so this is only empty-on-mismatch for a block built against another
    /// document.
    #[must_use]
    pub fn text<'a>(&self, document: &'a SourceDocument) -> &'a str {
        document.slice(self.range.clone()).unwrap_or_default()
    }

    /// Display name: the first label, or the range for unlabelled blocks.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.labels
            .first()
            .cloned()
            .unwrap_or_else(|| format!("{}..{}", self.range.start, self.range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_builder() {
        let marker = Marker::literal("struct FrameCache")
            .named("cache")
            .inclusive()
            .closing();

        assert_eq!(marker.name, "cache");
        assert_eq!(marker.edge, MarkerEdge::Inclusive);
        assert_eq!(marker.role, MarkerRole::End);
        assert!(matches!(marker.key, MarkerKey::Literal(ref t) if t == "struct FrameCache"));
    }

    #[test]
    fn test_marker_defaults() {
        let marker = Marker::literal("---MARK1---");
        assert_eq!(marker.name, "---MARK1---");
        assert_eq!(marker.role, MarkerRole::Start);
        assert_eq!(marker.edge, MarkerEdge::Exclusive);
    }

    #[test]
    fn test_marker_cut() {
        let matched = 10..15;
        assert_eq!(Marker::literal("x").cut(matched.clone()), 10..15);
        assert_eq!(Marker::literal("x").inclusive().cut(matched.clone()), 10..10);
        assert_eq!(
            Marker::literal("x").inclusive().closing().cut(matched.clone()),
            15..15
        );
        assert_eq!(Marker::literal("x").closing().cut(matched), 10..15);
    }

    #[test]
    fn test_boundary_offset() {
        let boundary = Boundary::new("m", MarkerRole::Start, 4..9);
        assert_eq!(boundary.offset(), 4);
    }

    #[test]
    fn test_block_text_and_labels() {
        let doc = SourceDocument::new("doc", "A\nB\n");
        let block = Block::content(2..4, vec!["mid".to_string()]);
        assert_eq!(block.text(&doc), "B\n");
        assert!(block.has_label("mid"));
        assert!(!block.has_label("head"));
        assert_eq!(block.display_name(), "mid");
        assert_eq!(Block::content(0..2, Vec::new()).display_name(), "0..2");
    }
}
