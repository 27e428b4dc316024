//! Configuration constants and validation functions for the splitter.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Result, SplitError};

/// Default name of the aggregator unit (`mod.rs`).
pub const AGGREGATOR_UNIT_NAME: &str = "mod";

/// Default file extension for written units.
pub const DEFAULT_UNIT_EXTENSION: &str = "rs";

/// Label carried by the first content block of every split.
pub const LEADING_LABEL: &str = "leading";

/// Label carried by the last content block of every split.
pub const REMAINDER_LABEL: &str = "remainder";

/// Prefix of the label given to the discarded text of an exclusive marker.
pub const DISCARD_LABEL_PREFIX: &str = "marker:";

/// Export entry that re-exports everything from a unit.
pub const GLOB_EXPORT: &str = "*";

/// Keywords that cannot be used as a module name in a `mod` declaration.
const RESERVED_MODULE_NAMES: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "async", "await", "dyn",
];

/// Identifier pattern for unit names.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Pattern for re-exported symbol names (identifiers, optionally `Name as Alias`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SYMBOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?: as [A-Za-z_][A-Za-z0-9_]*)?$").expect("valid regex")
});

/// Validate a unit name.
///
/// Unit names become module names in the aggregator and file names on disk,
/// so they must be plain identifiers and not keywords.
///
/// # Examples
/// ```
/// use modsplit::config::validate_unit_name;
///
/// assert!(validate_unit_name("frame_cache").is_ok());
/// assert!(validate_unit_name("frame-cache").is_err());
/// assert!(validate_unit_name("type").is_err());
/// ```
pub fn validate_unit_name(name: &str) -> Result<()> {
    if IDENTIFIER_PATTERN.is_match(name) && !RESERVED_MODULE_NAMES.contains(&name) {
        Ok(())
    } else {
        Err(SplitError::InvalidUnitName(name.to_string()))
    }
}

/// Validate the aggregator unit name.
///
/// Unlike other units the aggregator is never declared with `mod`, so `mod`
/// itself is accepted.
pub fn validate_aggregator_name(name: &str) -> Result<()> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(SplitError::InvalidUnitName(name.to_string()))
    }
}

/// Validate one entry of a unit's export list.
pub fn validate_export(unit: &str, symbol: &str) -> Result<()> {
    if symbol == GLOB_EXPORT || SYMBOL_PATTERN.is_match(symbol) {
        Ok(())
    } else {
        Err(SplitError::InvalidSpec(format!(
            "unit '{unit}' exports invalid symbol '{symbol}'"
        )))
    }
}

/// Name a symbol is visible under at the aggregator level.
///
/// `Foo as Bar` is visible as `Bar`.
///
/// # Examples
/// ```
/// use modsplit::config::exported_name;
///
/// assert_eq!(exported_name("FrameCache"), "FrameCache");
/// assert_eq!(exported_name("Cache as FrameCache"), "FrameCache");
/// ```
pub fn exported_name(symbol: &str) -> &str {
    symbol
        .rsplit_once(" as ")
        .map_or(symbol, |(_, alias)| alias)
}

/// Default output directory for a document: a sibling directory named after
/// the document's file stem (`src/core/preview.rs` → `src/core/preview`).
pub fn default_output_dir(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "split".into());
    match document.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    }
}
