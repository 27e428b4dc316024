//! Error types for the splitter.
//!
//! Every failure of a split run surfaces as a single `SplitError`. The engine
//! variants are terminal: a run that returns one has produced no units.

use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A marker's search key does not occur at or after its scan position.
    #[error("Marker not found: '{0}' (not present after the previous marker)")]
    MarkerNotFound(String),

    /// Block extraction left a gap, produced an overlap, or content was not claimed.
    #[error("Coverage violation at {}..{}: {reason}", .range.start, .range.end)]
    CoverageViolation { range: Range<usize>, reason: String },

    /// Two units re-export the same symbol.
    #[error("Symbol '{0}' is re-exported by more than one unit")]
    DuplicateReexport(String),

    /// Two markers share a name.
    #[error("Duplicate marker name: '{0}'")]
    DuplicateMarker(String),

    /// A marker uses a label the extractor assigns itself.
    #[error("Marker name '{0}' is reserved")]
    ReservedLabel(String),

    /// Two units (or a unit and the aggregator) share a name.
    #[error("Duplicate unit name: '{0}'")]
    DuplicateUnit(String),

    /// A unit name cannot be used as a module name.
    #[error("Invalid unit name: '{0}'. Expected an identifier (e.g., frame_cache)")]
    InvalidUnitName(String),

    /// A unit claims a block label that no block carries.
    #[error("Unit '{unit}' references unknown block '{block}'")]
    UnknownBlock { unit: String, block: String },

    /// A marker or line filter carries a regex that does not compile.
    #[error("Invalid pattern for '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Committing a unit would replace the document being split.
    #[error("Unit '{unit}' would overwrite the source document {}", .path.display())]
    OverwritesSource { unit: String, path: PathBuf },

    /// A split specification entry is structurally wrong.
    #[error("Invalid split specification: {0}")]
    InvalidSpec(String),

    /// YAML split specification could not be parsed.
    #[error("YAML parsing failed: {0}")]
    SpecParse(#[from] serde_yaml_ng::Error),

    /// JSON split specification could not be parsed.
    #[error("JSON parsing failed: {0}")]
    SpecJson(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;
