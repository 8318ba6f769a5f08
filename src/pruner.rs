//! Removal of directories left empty after sorting.

use crate::error::{SortError, SortResult};
use crate::walker;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a prune pass.
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Directories removed, deepest first.
    pub removed: Vec<PathBuf>,
    /// Directories that could not be removed.
    pub errors: Vec<SortError>,
}

fn is_empty_dir(path: &Path) -> std::io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Removes every empty directory beneath `root`, bottom-up.
///
/// Directories are visited in reverse pre-order, so a parent is only checked
/// after all of its children, and a chain of empty directories collapses in
/// one pass. The root itself is never removed. Directories that vanished or
/// gained entries since the walk are skipped.
///
/// # Errors
///
/// Returns [`SortError::InvalidRoot`] if `root` is missing or not a directory.
pub fn prune(root: &Path) -> SortResult<PruneReport> {
    let mut dirs = walker::walk(root)?.dirs;
    dirs.reverse();

    let mut report = PruneReport::default();
    for dir in dirs {
        if dir == root {
            continue;
        }
        match is_empty_dir(&dir) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                log::debug!("Skipping {}: {}", dir.display(), e);
                continue;
            }
        }

        match fs::remove_dir(&dir) {
            Ok(()) => {
                log::debug!("Removed empty directory {}", dir.display());
                report.removed.push(dir);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} already removed", dir.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::DirectoryNotEmpty => {
                log::debug!("{} is no longer empty", dir.display());
            }
            Err(e) => {
                let err = SortError::Prune { path: dir, source: e };
                log::warn!("{}", err);
                report.errors.push(err);
            }
        }
    }

    log::info!("Pruned {} empty directories", report.removed.len());
    Ok(report)
}
