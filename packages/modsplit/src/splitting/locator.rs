//! Boundary resolution: markers to document offsets in one pass.

use super::matcher::KeyMatcher;
use super::types::{Boundary, Marker};
use crate::error::{Result, SplitError};
use crate::types::SourceDocument;

/// Resolve markers to boundaries in a single left-to-right scan.
///
/// A cursor starts at the beginning of the document. Each marker is searched
/// from the end of the previous marker's match, so a repeated substring
/// resolves to the first occurrence after everything declared before it, and
/// resolved offsets never decrease.
///
/// # Errors
/// `SplitError::MarkerNotFound` when a key does not occur after the cursor.
pub fn locate(document: &SourceDocument, markers: &[Marker]) -> Result<Vec<Boundary>> {
    let text = document.text();
    let mut cursor = 0;
    let mut boundaries = Vec::with_capacity(markers.len());

    for marker in markers {
        let Some(matched) = marker.key.find_from(text, cursor) else {
            tracing::debug!(
                marker = %marker.name,
                key = %marker.key.describe(),
                cursor,
                "Marker not found after cursor"
            );
            return Err(SplitError::MarkerNotFound(marker.name.clone()));
        };

        cursor = matched.end;
        let span = marker.cut(matched);

        tracing::debug!(
            marker = %marker.name,
            offset = span.start,
            len = span.len(),
            "Resolved boundary"
        );

        boundaries.push(Boundary::new(marker.name.clone(), marker.role, span));
    }

    Ok(boundaries)
}
