//! Directory traversal.
//!
//! Produces the regular files and the directories beneath a root in pre-order
//! (a directory always precedes its contents), with siblings sorted by name.
//! Symbolic links are never followed and never reported.

use crate::error::{SortError, SortResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything found beneath a root during one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    /// Regular files, in discovery order.
    pub files: Vec<PathBuf>,
    /// Directories below the root (the root itself excluded), parents before children.
    pub dirs: Vec<PathBuf>,
}

/// Checks that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> SortResult<()> {
    let metadata = fs::metadata(root).map_err(|e| SortError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(SortError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

/// Walks `root` and returns every regular file and directory beneath it.
///
/// Entries that disappear or cannot be read during the walk are logged and
/// skipped. Symbolic links (to files or directories) are left out entirely.
///
/// # Errors
///
/// Returns [`SortError::InvalidRoot`] if `root` is missing or not a directory.
///
/// # Examples
///
/// ```no_run
/// use dirsort::walker;
/// use std::path::Path;
///
/// let found = walker::walk(Path::new("/home/user/Downloads")).unwrap();
/// println!("{} files in {} directories", found.files.len(), found.dirs.len());
/// ```
pub fn walk(root: &Path) -> SortResult<WalkResult> {
    validate_root(root)?;

    let mut result = WalkResult::default();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            result.dirs.push(entry.into_path());
        } else if file_type.is_file() {
            result.files.push(entry.into_path());
        } else {
            log::debug!("Skipping non-regular entry {}", entry.path().display());
        }
    }

    log::debug!(
        "Walked {}: {} files, {} directories",
        root.display(),
        result.files.len(),
        result.dirs.len()
    );
    Ok(result)
}
