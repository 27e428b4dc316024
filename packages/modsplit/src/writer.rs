//! Committing a split result to disk.
//!
//! The engine only produces values; this module is the one place that writes.
//! Every unit is first staged as a hidden temp file next to its destination,
//! and nothing is renamed into place until all temps have been written.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};
use crate::types::SplitOutput;

/// A unit staged on disk, waiting to be renamed into place.
struct Staged {
    temp: PathBuf,
    target: PathBuf,
}

/// Hidden temp path for a target file (`cache.rs` → `.cache.rs.tmp`).
fn temp_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!(".{file_name}.tmp"))
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Remove staged temp files, ignoring files that are already gone.
fn discard(staged: &[Staged]) {
    for entry in staged {
        if let Err(e) = fs::remove_file(&entry.temp) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %entry.temp.display(), error = %e, "Failed to remove temp file");
            }
        }
    }
}

/// Write every unit of `output` into `dir` as `<name>.<extension>`.
///
/// The directory is created if needed. All units are written to temp files
/// and synced before any of them is renamed into place. If a temp write
/// fails, the temps written so far are removed and no target file is
/// touched.
///
/// Returns the written paths in unit order.
///
/// # Errors
/// `SplitError::Io` for any file system failure.
pub fn commit(output: &SplitOutput, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut staged: Vec<Staged> = Vec::with_capacity(output.units.len());
    for unit in &output.units {
        let file_name = unit.file_name(extension);
        let entry = Staged {
            temp: temp_path(dir, &file_name),
            target: dir.join(&file_name),
        };

        if let Err(e) = write_synced(&entry.temp, &unit.body) {
            tracing::warn!(unit = %unit.name, "Staging failed, discarding temp files");
            // The failed temp may exist half-written.
            staged.push(entry);
            discard(&staged);
            return Err(e);
        }
        staged.push(entry);
    }

    let mut written = Vec::with_capacity(staged.len());
    for (index, entry) in staged.iter().enumerate() {
        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if entry.target.exists() {
            fs::remove_file(&entry.target)?;
        }

        if let Err(e) = fs::rename(&entry.temp, &entry.target) {
            discard(&staged[index..]);
            return Err(e.into());
        }
        tracing::debug!(path = %entry.target.display(), "Wrote unit");
        written.push(entry.target.clone());
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "Committed split output");
    Ok(written)
}

/// Check that committing `output` into `dir` leaves `source` untouched.
///
/// A unit whose target file resolves to the source document would replace
/// it, and a later [`retire_source`] would then delete that unit. Targets
/// that do not exist yet cannot be the source.
///
/// # Errors
/// `SplitError::OverwritesSource` naming the colliding unit, or
/// `SplitError::Io` if the source cannot be resolved.
pub fn ensure_source_preserved(
    output: &SplitOutput,
    dir: &Path,
    extension: &str,
    source: &Path,
) -> Result<()> {
    let source = fs::canonicalize(source)?;
    for unit in &output.units {
        let target = dir.join(unit.file_name(extension));
        if !target.exists() {
            continue;
        }
        if fs::canonicalize(&target)? == source {
            return Err(SplitError::OverwritesSource {
                unit: unit.name.clone(),
                path: target,
            });
        }
    }
    Ok(())
}

/// Delete the original document.
///
/// Only call this after [`commit`] returned `Ok`.
///
/// # Errors
/// `SplitError::Io` if the file cannot be removed.
pub fn retire_source(path: &Path) -> Result<()> {
    fs::remove_file(path)?;
    tracing::info!(path = %path.display(), "Removed source document");
    Ok(())
}
