//! Boundary-driven document splitting.
//!
//! Markers are resolved to boundaries in one forward scan, boundaries slice
//! the document into labelled blocks that cover it completely, and the
//! [`SplitEngine`] assigns blocks to units and composes them.

mod engine;
mod extractor;
mod locator;
mod matcher;
mod registry;
mod types;

pub use engine::{split, SplitEngine};
pub use extractor::{extract, trim_blank_lines, verify_coverage};
pub use locator::locate;
pub use matcher::{KeyMatcher, LinePrefix, MarkerKey};
pub use registry::{BlockRegistry, ClaimKind};
pub use types::{Block, BlockKind, Boundary, Marker, MarkerEdge, MarkerRole};
