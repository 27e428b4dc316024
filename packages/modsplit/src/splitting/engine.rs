//! Split engine that stages a complete run in memory.

use std::borrow::Cow;
use std::collections::HashSet;

use super::extractor::{extract, trim_blank_lines};
use super::locator::locate;
use super::registry::{BlockRegistry, ClaimKind};
use super::types::Block;
use crate::compose::{compose, generate, validate_exports};
use crate::error::{Result, SplitError};
use crate::spec::{LineFilter, SplitSpec, UnitSpec};
use crate::types::{SourceDocument, SplitOutput, Unit};

/// Engine for splitting one document according to a [`SplitSpec`].
///
/// A run is all-or-nothing: every stage works on in-memory values, and a
/// [`SplitOutput`] only exists once every unit has been composed. Nothing
/// here touches the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitEngine;

impl SplitEngine {
    /// Create a new split engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve markers and slice the document, without composing units.
    ///
    /// # Errors
    /// Spec validation errors, `MarkerNotFound` or `CoverageViolation`.
    pub fn resolve(&self, document: &SourceDocument, spec: &SplitSpec) -> Result<Vec<Block>> {
        spec.validate()?;
        let boundaries = locate(document, &spec.markers)?;
        extract(document, &boundaries)
    }

    /// Run a complete split.
    ///
    /// Stages, in order: validate the spec, locate boundaries, extract
    /// blocks, check discard labels, claim blocks per unit, enforce that no
    /// non-blank content is dropped or duplicated, validate re-exports, then
    /// compose the units and the aggregator.
    ///
    /// # Errors
    /// The first failing stage's error. No partial output is returned.
    pub fn run(&self, document: &SourceDocument, spec: &SplitSpec) -> Result<SplitOutput> {
        let blocks = self.resolve(document, spec)?;
        tracing::debug!(
            document = %document.name(),
            blocks = blocks.len(),
            "Document resolved into blocks"
        );

        let mut registry = BlockRegistry::new(&blocks);
        for label in &spec.discard {
            if !registry.contains(label) {
                return Err(SplitError::InvalidSpec(format!(
                    "discard lists unknown block '{label}'"
                )));
            }
        }

        let claims = spec
            .units
            .iter()
            .map(|unit| claim_parts(&mut registry, document, unit))
            .collect::<Result<Vec<_>>>()?;

        check_coverage(&registry, document, spec)?;
        validate_exports(&spec.units)?;

        let mut units = Vec::with_capacity(spec.units.len() + 1);
        for (unit, parts) in spec.units.iter().zip(claims) {
            let body = compose(&unit.header, parts.as_slice());
            tracing::debug!(
                unit = %unit.name,
                parts = parts.len(),
                bytes = body.len(),
                "Composed unit"
            );
            units.push(Unit::new(unit.name.clone(), body));
        }
        units.push(generate(&spec.aggregator, &spec.units));

        tracing::info!(
            document = %document.name(),
            units = units.len(),
            "Split complete"
        );

        Ok(SplitOutput {
            units,
            aggregator: spec.aggregator.name.clone(),
            blocks,
        })
    }
}

/// Claim every block a unit references and return its text parts in order.
fn claim_parts<'d>(
    registry: &mut BlockRegistry<'_>,
    document: &'d SourceDocument,
    unit: &UnitSpec,
) -> Result<Vec<Cow<'d, str>>> {
    unit.blocks
        .iter()
        .map(|block_ref| -> Result<Cow<'d, str>> {
            let kind = match block_ref.lines {
                Some(_) => ClaimKind::Filtered,
                None => ClaimKind::Whole,
            };
            let block = registry
                .claim(&block_ref.block, kind)?
                .ok_or_else(|| SplitError::UnknownBlock {
                    unit: unit.name.clone(),
                    block: block_ref.block.clone(),
                })?;
            let text = block.text(document);
            Ok(match &block_ref.lines {
                Some(filter) => Cow::Owned(filter.apply(text)),
                None => Cow::Borrowed(text),
            })
        })
        .collect()
}

/// Fail when any non-blank text would be dropped or duplicated.
///
/// Unclaimed blocks must be blank or discarded. In a block claimed through
/// line filters, every non-blank line must be kept by exactly one filter;
/// lines no filter keeps are allowed only when the block is discarded.
fn check_coverage(
    registry: &BlockRegistry<'_>,
    document: &SourceDocument,
    spec: &SplitSpec,
) -> Result<()> {
    let discard: HashSet<&str> = spec.discard.iter().map(String::as_str).collect();
    let is_discarded = |block: &Block| block.labels.iter().any(|l| discard.contains(l.as_str()));

    for block in registry.unclaimed_content() {
        if is_discarded(block) {
            tracing::debug!(block = %block.display_name(), "Discarding block");
            continue;
        }
        if trim_blank_lines(block.text(document)).is_empty() {
            continue;
        }
        return Err(SplitError::CoverageViolation {
            range: block.range.clone(),
            reason: format!(
                "block '{}' is neither claimed by a unit nor discarded",
                block.display_name()
            ),
        });
    }

    for block in registry.filtered_content() {
        let filters: Vec<&LineFilter> = spec
            .units
            .iter()
            .flat_map(|unit| &unit.blocks)
            .filter(|r| registry.get(&r.block).is_some_and(|b| std::ptr::eq(b, block)))
            .filter_map(|r| r.lines.as_ref())
            .collect();
        let discarded = is_discarded(block);

        let mut offset = block.range.start;
        for raw in block.text(document).split_inclusive('\n') {
            let range = offset..offset + raw.len();
            offset = range.end;

            let line = raw.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }
            let reason = match filters.iter().filter(|f| f.is_match(line)).count() {
                0 if !discarded => format!(
                    "line {line:?} of block '{}' is kept by no line filter and the block is not discarded",
                    block.display_name()
                ),
                0 | 1 => continue,
                n => format!(
                    "line {line:?} of block '{}' is kept by {n} line filters",
                    block.display_name()
                ),
            };
            return Err(SplitError::CoverageViolation { range, reason });
        }
    }
    Ok(())
}

/// Split a document with a fresh engine.
///
/// # Errors
/// See [`SplitEngine::run`].
pub fn split(document: &SourceDocument, spec: &SplitSpec) -> Result<SplitOutput> {
    SplitEngine::new().run(document, spec)
}
