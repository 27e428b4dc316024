//! On-disk representation of a split specification.

use regex::Regex;
use serde::Deserialize;

use super::{AggregatorSpec, BlockRef, Header, LineFilter, SplitSpec, UnitSpec};
use crate::config::AGGREGATOR_UNIT_NAME;
use crate::error::{Result, SplitError};
use crate::splitting::{LinePrefix, Marker, MarkerEdge, MarkerKey, MarkerRole};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct SpecFile {
    #[serde(default)]
    markers: Vec<MarkerEntry>,
    units: Vec<UnitEntry>,
    #[serde(default)]
    discard: Vec<String>,
    #[serde(default)]
    aggregator: Option<AggregatorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarkerEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    literal: Option<String>,
    #[serde(default)]
    line_prefix: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    role: MarkerRole,
    #[serde(default)]
    edge: MarkerEdge,
}

/// A header is either a list of lines or one block of text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HeaderEntry {
    Lines(Vec<String>),
    Text(String),
}

impl Default for HeaderEntry {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

/// A block claim is either a bare label or a label with a line filter.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockEntry {
    Label(String),
    Filtered(FilteredBlockEntry),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilteredBlockEntry {
    block: String,
    #[serde(default)]
    starts_with: Option<String>,
    #[serde(default)]
    matches: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitEntry {
    name: String,
    #[serde(default)]
    header: HeaderEntry,
    #[serde(default)]
    blocks: Vec<BlockEntry>,
    #[serde(default)]
    exports: Vec<String>,
    #[serde(default)]
    export_attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AggregatorEntry {
    #[serde(default = "default_aggregator_name")]
    name: String,
    #[serde(default)]
    doc: Vec<String>,
    #[serde(default)]
    visibility: Option<String>,
}

fn default_aggregator_name() -> String {
    AGGREGATOR_UNIT_NAME.to_string()
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| SplitError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

impl TryFrom<MarkerEntry> for Marker {
    type Error = SplitError;

    fn try_from(entry: MarkerEntry) -> Result<Self> {
        let label = entry.name.clone().unwrap_or_else(|| {
            entry
                .literal
                .as_ref()
                .or(entry.line_prefix.as_ref())
                .or(entry.pattern.as_ref())
                .cloned()
                .unwrap_or_default()
        });

        let key = match (entry.literal, entry.line_prefix, entry.pattern) {
            (Some(text), None, None) => MarkerKey::Literal(text),
            (None, Some(prefix), None) => MarkerKey::LinePrefix(LinePrefix(prefix)),
            (None, None, Some(pattern)) => MarkerKey::Pattern(compile(&label, &pattern)?),
            (None, None, None) => {
                return Err(SplitError::InvalidSpec(format!(
                    "marker '{label}' needs one of literal, line_prefix or pattern"
                )))
            }
            _ => {
                return Err(SplitError::InvalidSpec(format!(
                    "marker '{label}' declares more than one search key"
                )))
            }
        };

        let name = entry.name.unwrap_or_else(|| key.default_name());
        Ok(Marker::new(name, key)
            .with_role(entry.role)
            .with_edge(entry.edge))
    }
}

impl BlockEntry {
    fn into_block_ref(self, unit: &str) -> Result<BlockRef> {
        match self {
            Self::Label(label) => Ok(BlockRef::whole(label)),
            Self::Filtered(entry) => {
                let filter = match (entry.starts_with, entry.matches) {
                    (Some(prefix), None) => LineFilter::StartsWith(prefix),
                    (None, Some(pattern)) => LineFilter::Matches(compile(
                        &format!("{unit}/{}", entry.block),
                        &pattern,
                    )?),
                    (None, None) => return Ok(BlockRef::whole(entry.block)),
                    (Some(_), Some(_)) => {
                        return Err(SplitError::InvalidSpec(format!(
                            "unit '{unit}' filters block '{}' with both starts_with and matches",
                            entry.block
                        )))
                    }
                };
                Ok(BlockRef::filtered(entry.block, filter))
            }
        }
    }
}

impl From<HeaderEntry> for Header {
    fn from(entry: HeaderEntry) -> Self {
        match entry {
            HeaderEntry::Lines(lines) => Header::new(lines),
            HeaderEntry::Text(text) => Header::new(text.lines()),
        }
    }
}

impl TryFrom<UnitEntry> for UnitSpec {
    type Error = SplitError;

    fn try_from(entry: UnitEntry) -> Result<Self> {
        let blocks = entry
            .blocks
            .into_iter()
            .map(|b| b.into_block_ref(&entry.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(UnitSpec {
            name: entry.name,
            header: entry.header.into(),
            blocks,
            exports: entry.exports,
            export_attributes: entry.export_attributes,
        })
    }
}

impl From<AggregatorEntry> for AggregatorSpec {
    fn from(entry: AggregatorEntry) -> Self {
        AggregatorSpec {
            name: entry.name,
            doc: entry.doc,
            visibility: entry.visibility.filter(|v| !v.trim().is_empty()),
        }
    }
}

impl TryFrom<SpecFile> for SplitSpec {
    type Error = SplitError;

    fn try_from(file: SpecFile) -> Result<Self> {
        Ok(SplitSpec {
            markers: file
                .markers
                .into_iter()
                .map(Marker::try_from)
                .collect::<Result<_>>()?,
            units: file
                .units
                .into_iter()
                .map(UnitSpec::try_from)
                .collect::<Result<_>>()?,
            discard: file.discard,
            aggregator: file.aggregator.map(Into::into).unwrap_or_default(),
        })
    }
}
