//! Unit composition: headers around blocks, and the aggregator unit.

mod header;
mod manifest;

pub use header::{compose, render_header};
pub use manifest::{generate, validate_exports};
