//! Declarative split specification.
//!
//! A [`SplitSpec`] says where to cut (ordered [`Marker`]s), what to build from
//! the pieces ([`UnitSpec`]s), which pieces may be dropped, and how the
//! aggregator unit looks. It can be built in code or loaded from YAML/JSON
//! (see [`SplitSpec::from_yaml`]).

mod file;

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use crate::config::{
    validate_aggregator_name, validate_export, validate_unit_name, AGGREGATOR_UNIT_NAME,
    DISCARD_LABEL_PREFIX, LEADING_LABEL, REMAINDER_LABEL,
};
use crate::error::{Result, SplitError};
use crate::splitting::{Marker, MarkerKey};

/// Selects the lines of a block a unit keeps.
#[derive(Debug, Clone)]
pub enum LineFilter {
    /// Keep lines starting with this text.
    StartsWith(String),

    /// Keep lines matching this regex.
    Matches(Regex),
}

impl LineFilter {
    /// Check a single line (without its terminator).
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::StartsWith(prefix) => line.starts_with(prefix.as_str()),
            Self::Matches(regex) => regex.is_match(line),
        }
    }

    /// Keep the matching lines of `text`, joined with `\n`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        text.lines()
            .filter(|line| self.is_match(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A unit's claim on one block.
#[derive(Debug, Clone)]
pub struct BlockRef {
    /// Label of the claimed block.
    pub block: String,

    /// Optional line filter; `None` claims the whole block.
    pub lines: Option<LineFilter>,
}

impl BlockRef {
    /// Claim a whole block.
    #[must_use]
    pub fn whole(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            lines: None,
        }
    }

    /// Claim only the lines of a block that pass a filter.
    #[must_use]
    pub fn filtered(block: impl Into<String>, filter: LineFilter) -> Self {
        Self {
            block: block.into(),
            lines: Some(filter),
        }
    }
}

/// Preamble of a unit: explicit dependency lines.
///
/// Empty lines are kept and act as group separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub lines: Vec<String>,
}

impl Header {
    /// Create a header from lines.
    #[must_use]
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the header has no visible content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Declarative description of one output unit.
#[derive(Debug, Clone)]
pub struct UnitSpec {
    /// Unit name; becomes the module name.
    pub name: String,

    /// Preamble prepended to the content.
    pub header: Header,

    /// Claimed blocks, in output order.
    pub blocks: Vec<BlockRef>,

    /// Symbols the aggregator re-exports from this unit (`*` for a glob).
    pub exports: Vec<String>,

    /// Attribute lines emitted above this unit's re-export.
    pub export_attributes: Vec<String>,
}

impl UnitSpec {
    /// Create an empty unit specification.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: Header::default(),
            blocks: Vec::new(),
            exports: Vec::new(),
            export_attributes: Vec::new(),
        }
    }

    /// Set the header lines.
    #[must_use]
    pub fn with_header(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.header = Header::new(lines);
        self
    }

    /// Claim a whole block.
    #[must_use]
    pub fn with_block(mut self, label: impl Into<String>) -> Self {
        self.blocks.push(BlockRef::whole(label));
        self
    }

    /// Claim the filtered lines of a block.
    #[must_use]
    pub fn with_filtered_block(mut self, label: impl Into<String>, filter: LineFilter) -> Self {
        self.blocks.push(BlockRef::filtered(label, filter));
        self
    }

    /// Set the exported symbols.
    #[must_use]
    pub fn with_exports(mut self, exports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exports = exports.into_iter().map(Into::into).collect();
        self
    }

    /// Set the attribute lines for the re-export.
    #[must_use]
    pub fn with_export_attributes(
        mut self,
        attributes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.export_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }
}

/// Shape of the aggregator unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorSpec {
    /// Unit name (file stem) of the aggregator.
    pub name: String,

    /// Inner doc lines (`//!`) at the top of the aggregator.
    pub doc: Vec<String>,

    /// Visibility for the `mod` declarations, e.g. `pub` or `pub(crate)`.
    pub visibility: Option<String>,
}

impl Default for AggregatorSpec {
    fn default() -> Self {
        Self {
            name: AGGREGATOR_UNIT_NAME.to_string(),
            doc: Vec::new(),
            visibility: None,
        }
    }
}

impl AggregatorSpec {
    /// Set the inner doc lines.
    #[must_use]
    pub fn with_doc(mut self, doc: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.doc = doc.into_iter().map(Into::into).collect();
        self
    }

    /// Set the visibility of the `mod` declarations.
    #[must_use]
    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }
}

/// Complete declarative split specification.
#[derive(Debug, Clone, Default)]
pub struct SplitSpec {
    /// Markers in document order.
    pub markers: Vec<Marker>,

    /// Units in declaration order; the aggregator lists them in this order.
    pub units: Vec<UnitSpec>,

    /// Block labels that may be left unclaimed.
    pub discard: Vec<String>,

    /// Aggregator settings.
    pub aggregator: AggregatorSpec,
}

impl SplitSpec {
    /// Create an empty specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Append a unit.
    #[must_use]
    pub fn with_unit(mut self, unit: UnitSpec) -> Self {
        self.units.push(unit);
        self
    }

    /// Allow a block to stay unclaimed.
    #[must_use]
    pub fn with_discard(mut self, label: impl Into<String>) -> Self {
        self.discard.push(label.into());
        self
    }

    /// Replace the aggregator settings.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: AggregatorSpec) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Parse a YAML split specification.
    ///
    /// # Errors
    /// `SpecParse` for malformed YAML, `InvalidSpec`/`InvalidPattern` for bad
    /// entries, and any error from [`SplitSpec::validate`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: file::SpecFile = serde_yaml_ng::from_str(yaml)?;
        let spec = Self::try_from(raw)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse a JSON split specification.
    ///
    /// # Errors
    /// Same as [`SplitSpec::from_yaml`], with `SpecJson` for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: file::SpecFile = serde_json::from_str(json)?;
        let spec = Self::try_from(raw)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Load a specification file; `.json` files are read as JSON, anything
    /// else as YAML.
    ///
    /// # Errors
    /// `Io` when the file cannot be read, plus the parse errors above.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %path.display(), json = is_json, "Loading split specification");

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Check names and keys.
    ///
    /// Block labels are checked later, against the blocks a document
    /// actually produces.
    ///
    /// # Errors
    /// The first problem found, as a named `SplitError`.
    pub fn validate(&self) -> Result<()> {
        let mut marker_names = HashSet::new();
        for marker in &self.markers {
            if marker.name == LEADING_LABEL
                || marker.name == REMAINDER_LABEL
                || marker.name.starts_with(DISCARD_LABEL_PREFIX)
            {
                return Err(SplitError::ReservedLabel(marker.name.clone()));
            }
            if !marker_names.insert(marker.name.as_str()) {
                return Err(SplitError::DuplicateMarker(marker.name.clone()));
            }
            let empty_key = match &marker.key {
                MarkerKey::Literal(text) => text.is_empty(),
                MarkerKey::LinePrefix(prefix) => prefix.0.is_empty(),
                MarkerKey::Pattern(_) => false,
            };
            if empty_key {
                return Err(SplitError::InvalidSpec(format!(
                    "marker '{}' has an empty search key",
                    marker.name
                )));
            }
        }

        validate_aggregator_name(&self.aggregator.name)?;

        let mut unit_names = HashSet::new();
        unit_names.insert(self.aggregator.name.as_str());
        for unit in &self.units {
            validate_unit_name(&unit.name)?;
            if !unit_names.insert(unit.name.as_str()) {
                return Err(SplitError::DuplicateUnit(unit.name.clone()));
            }
            for symbol in &unit.exports {
                validate_export(&unit.name, symbol)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_spec() -> SplitSpec {
        SplitSpec::new()
            .with_marker(Marker::literal("---MARK1---"))
            .with_marker(Marker::literal("---MARK2---"))
            .with_unit(UnitSpec::new("head").with_block("leading"))
            .with_unit(UnitSpec::new("mid").with_block("---MARK1---"))
            .with_unit(UnitSpec::new("tail").with_block("remainder"))
    }

    #[test]
    fn test_validate_example_spec() {
        assert!(example_spec().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_marker() {
        let spec = example_spec().with_marker(Marker::literal("---MARK1---"));
        assert!(matches!(
            spec.validate(),
            Err(SplitError::DuplicateMarker(ref name)) if name == "---MARK1---"
        ));
    }

    #[test]
    fn test_validate_reserved_marker_names() {
        for name in ["leading", "remainder", "marker:x"] {
            let spec = SplitSpec::new().with_marker(Marker::literal("x").named(name));
            assert!(
                matches!(spec.validate(), Err(SplitError::ReservedLabel(_))),
                "{name} should be reserved"
            );
        }
    }

    #[test]
    fn test_validate_empty_key() {
        let spec = SplitSpec::new().with_marker(Marker::literal("").named("empty"));
        assert!(matches!(spec.validate(), Err(SplitError::InvalidSpec(_))));
    }

    #[test]
    fn test_validate_duplicate_unit() {
        let spec = example_spec().with_unit(UnitSpec::new("mid"));
        assert!(matches!(
            spec.validate(),
            Err(SplitError::DuplicateUnit(ref name)) if name == "mid"
        ));
    }

    #[test]
    fn test_validate_unit_named_like_aggregator() {
        let spec = example_spec().with_aggregator(AggregatorSpec {
            name: "tail".to_string(),
            ..AggregatorSpec::default()
        });
        assert!(matches!(spec.validate(), Err(SplitError::DuplicateUnit(_))));
    }

    #[test]
    fn test_validate_invalid_unit_name() {
        let spec = example_spec().with_unit(UnitSpec::new("frame-cache"));
        assert!(matches!(spec.validate(), Err(SplitError::InvalidUnitName(_))));
    }

    #[test]
    fn test_validate_invalid_export() {
        let spec = example_spec().with_unit(UnitSpec::new("extra").with_exports(["{A, B}"]));
        assert!(matches!(spec.validate(), Err(SplitError::InvalidSpec(_))));
    }

    #[test]
    fn test_line_filter_starts_with() {
        let filter = LineFilter::StartsWith("use ".to_string());
        let text = "use std::fmt;\n\n// comment\nuse std::sync::Arc;\nconst A: u8 = 1;\n";
        assert_eq!(filter.apply(text), "use std::fmt;\nuse std::sync::Arc;");
    }

    #[test]
    fn test_line_filter_matches() {
        let filter = LineFilter::Matches(Regex::new(r"^(pub )?const ").unwrap());
        let text = "use a;\nconst A: u8 = 1;\npub const B: u8 = 2;\n";
        assert_eq!(filter.apply(text), "const A: u8 = 1;\npub const B: u8 = 2;");
    }

    #[test]
    fn test_header_is_empty() {
        assert!(Header::default().is_empty());
        assert!(Header::new(["", "  "]).is_empty());
        assert!(!Header::new(["use std::fmt;"]).is_empty());
    }
}
