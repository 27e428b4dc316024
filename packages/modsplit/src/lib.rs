//! modsplit - Split one monolithic source file into a module directory.
//!
//! A document is cut along ordered, declarative markers into labelled blocks.
//! Blocks are assigned to named units, each unit gets an explicit header, and
//! an aggregator unit declares and re-exports the units. A run either yields
//! every unit or an error; the file system is only touched afterwards, by
//! [`writer::commit`].
//!
//! # Example
//!
//! ```
//! use modsplit::splitting::Marker;
//! use modsplit::{SourceDocument, SplitEngine, SplitSpec, UnitSpec};
//!
//! let document = SourceDocument::new("doc.txt", "A\n---MARK1---\nB\n---MARK2---\nC\n");
//! let spec = SplitSpec::new()
//!     .with_marker(Marker::literal("---MARK1---").named("mark1"))
//!     .with_marker(Marker::literal("---MARK2---").named("mark2"))
//!     .with_unit(UnitSpec::new("head").with_block("leading"))
//!     .with_unit(UnitSpec::new("mid").with_block("mark1"))
//!     .with_unit(UnitSpec::new("tail").with_block("remainder"));
//!
//! let output = SplitEngine::new().run(&document, &spec).unwrap();
//! assert_eq!(output.get("mid").unwrap().body, "B\n");
//! assert_eq!(
//!     output.get("mod").unwrap().body,
//!     "mod head;\nmod mid;\nmod tail;\n\npub use head::*;\npub use mid::*;\npub use tail::*;\n"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and name validation
//! - [`types`]: Documents, units and split output
//! - [`error`]: Error types and Result alias
//! - [`spec`]: Split specification (builder API, YAML/JSON loading)
//! - [`splitting`]: Marker resolution, block extraction and the split engine
//! - [`compose`]: Unit headers and the aggregator
//! - [`writer`]: Atomic commit to disk
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod spec;
pub mod splitting;
pub mod types;
pub mod writer;

// Re-export commonly used items
pub use error::{Result, SplitError};
pub use spec::{AggregatorSpec, SplitSpec, UnitSpec};
pub use splitting::{split, SplitEngine};
pub use types::{SourceDocument, SplitOutput, Unit};
