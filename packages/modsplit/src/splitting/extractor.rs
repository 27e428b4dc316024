//! Block extraction: boundaries to contiguous, labelled text ranges.

use std::ops::Range;

use super::types::{Block, BlockKind, Boundary, MarkerRole};
use crate::config::{DISCARD_LABEL_PREFIX, LEADING_LABEL, REMAINDER_LABEL};
use crate::error::{Result, SplitError};
use crate::types::SourceDocument;

/// Slice a document into blocks along resolved boundaries.
///
/// Content blocks sit between consecutive cuts. A start marker labels the
/// block after it, an end marker the block before it. The first content block
/// is also labelled `leading` and the last `remainder`, so trailing text after
/// the last marker is never dropped. The matched text of an exclusive marker
/// becomes a discard block labelled `marker:<name>`.
///
/// # Errors
/// `SplitError::CoverageViolation` when the boundaries are out of order, run
/// past the document, or cut through a UTF-8 character.
pub fn extract(document: &SourceDocument, boundaries: &[Boundary]) -> Result<Vec<Block>> {
    let len = document.len();
    let mut blocks = Vec::with_capacity(boundaries.len() * 2 + 1);
    let mut cursor = 0;
    let mut pending: Vec<String> = Vec::new();

    for boundary in boundaries {
        check_cut(document, cursor, &boundary.span)?;

        let mut labels = std::mem::take(&mut pending);
        if boundary.role == MarkerRole::End {
            labels.push(boundary.marker.clone());
        }
        blocks.push(Block::content(cursor..boundary.span.start, labels));

        if !boundary.span.is_empty() {
            blocks.push(Block::discard(
                boundary.span.clone(),
                format!("{DISCARD_LABEL_PREFIX}{}", boundary.marker),
            ));
        }

        if boundary.role == MarkerRole::Start {
            pending.push(boundary.marker.clone());
        }
        cursor = boundary.span.end;
    }

    blocks.push(Block::content(cursor..len, pending));

    if let Some(first) = blocks.iter_mut().find(|b| b.kind == BlockKind::Content) {
        first.labels.insert(0, LEADING_LABEL.to_string());
    }
    if let Some(last) = blocks.iter_mut().rev().find(|b| b.kind == BlockKind::Content) {
        last.labels.push(REMAINDER_LABEL.to_string());
    }

    verify_coverage(&blocks, len)?;
    Ok(blocks)
}

/// Check that a cut can follow the previous one.
fn check_cut(document: &SourceDocument, cursor: usize, span: &Range<usize>) -> Result<()> {
    let violation = |reason: &str| SplitError::CoverageViolation {
        range: span.clone(),
        reason: reason.to_string(),
    };

    if span.start < cursor {
        return Err(SplitError::CoverageViolation {
            range: span.start..cursor,
            reason: "boundary overlaps the previous block".to_string(),
        });
    }
    if span.end < span.start {
        return Err(violation("boundary span is reversed"));
    }
    if span.end > document.len() {
        return Err(violation("boundary lies past the end of the document"));
    }
    if document.slice(cursor..span.end).is_none() || document.slice(span.clone()).is_none() {
        return Err(violation("boundary splits a UTF-8 character"));
    }
    Ok(())
}

/// Verify the total coverage invariant.
///
/// Blocks must be sorted, contiguous, and span exactly `[0, len)`.
///
/// # Errors
/// `SplitError::CoverageViolation` naming the first gap or overlap.
pub fn verify_coverage(blocks: &[Block], len: usize) -> Result<()> {
    let mut expected = 0;
    for block in blocks {
        if block.range.start > expected {
            return Err(SplitError::CoverageViolation {
                range: expected..block.range.start,
                reason: format!("gap before block '{}'", block.display_name()),
            });
        }
        if block.range.start < expected {
            return Err(SplitError::CoverageViolation {
                range: block.range.start..expected,
                reason: format!("block '{}' overlaps its predecessor", block.display_name()),
            });
        }
        expected = block.range.end;
    }

    if expected != len {
        return Err(SplitError::CoverageViolation {
            range: expected.min(len)..expected.max(len),
            reason: "blocks do not end at the end of the document".to_string(),
        });
    }
    Ok(())
}

/// Strip leading and trailing blank lines.
///
/// The indentation of the first non-blank line is kept; trailing whitespace
/// (including the final line terminator) is removed. Text with no non-blank
/// line trims to the empty string.
///
/// # Examples
/// ```
/// use modsplit::splitting::trim_blank_lines;
///
/// assert_eq!(trim_blank_lines("\n\n    fn a() {}\n\n"), "    fn a() {}");
/// assert_eq!(trim_blank_lines(" \n\t\n"), "");
/// ```
pub fn trim_blank_lines(text: &str) -> &str {
    let end = text.trim_end().len();
    let text = &text[..end];

    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &text[start..]
}
