//! Label registry for extracted blocks.

use std::collections::HashMap;

use super::types::{Block, BlockKind};
use crate::error::{Result, SplitError};

/// How a unit claims a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKind {
    /// The unit takes every line of the block.
    Whole,

    /// The unit takes the lines a line filter keeps.
    Filtered,
}

/// Index from block label to block, plus claim tracking.
///
/// A block may be claimed in full by exactly one unit, or through line
/// filters by any number of units, never both.
pub struct BlockRegistry<'b> {
    blocks: &'b [Block],
    by_label: HashMap<&'b str, usize>,
    claims: Vec<Option<ClaimKind>>,
}

impl<'b> BlockRegistry<'b> {
    /// Index a slice of extracted blocks.
    #[must_use]
    pub fn new(blocks: &'b [Block]) -> Self {
        let mut by_label = HashMap::new();
        for (index, block) in blocks.iter().enumerate() {
            for label in &block.labels {
                by_label.insert(label.as_str(), index);
            }
        }
        Self {
            blocks,
            by_label,
            claims: vec![None; blocks.len()],
        }
    }

    /// Get the block carrying a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&'b Block> {
        self.by_label.get(label).map(|&i| &self.blocks[i])
    }

    /// Check if a label is known.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Look up a block and record a claim on it.
    ///
    /// Returns `Ok(None)` for an unknown label.
    ///
    /// # Errors
    /// `SplitError::CoverageViolation` when the claim would hand the same
    /// text to a second unit: a whole claim on an already claimed block, or
    /// a filtered claim on a block already claimed whole.
    pub fn claim(&mut self, label: &str, kind: ClaimKind) -> Result<Option<&'b Block>> {
        let Some(&index) = self.by_label.get(label) else {
            return Ok(None);
        };
        let block = &self.blocks[index];

        match (self.claims[index], kind) {
            (None, _) | (Some(ClaimKind::Filtered), ClaimKind::Filtered) => {
                self.claims[index] = Some(kind);
                Ok(Some(block))
            }
            (Some(previous), _) => Err(SplitError::CoverageViolation {
                range: block.range.clone(),
                reason: format!(
                    "block '{}' is claimed {} after being claimed {}",
                    block.display_name(),
                    describe(kind),
                    describe(previous)
                ),
            }),
        }
    }

    /// Content blocks nobody has claimed yet.
    pub fn unclaimed_content(&self) -> impl Iterator<Item = &'b Block> + '_ {
        self.with_claim(None)
    }

    /// Content blocks claimed only through line filters.
    pub fn filtered_content(&self) -> impl Iterator<Item = &'b Block> + '_ {
        self.with_claim(Some(ClaimKind::Filtered))
    }

    fn with_claim(&self, claim: Option<ClaimKind>) -> impl Iterator<Item = &'b Block> + '_ {
        let blocks = self.blocks;
        blocks
            .iter()
            .zip(&self.claims)
            .filter(move |(block, c)| block.kind == BlockKind::Content && **c == claim)
            .map(|(block, _)| block)
    }
}

fn describe(kind: ClaimKind) -> &'static str {
    match kind {
        ClaimKind::Whole => "in full",
        ClaimKind::Filtered => "through a line filter",
    }
}
