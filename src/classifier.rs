//! Bucketing discovered files by category.

use crate::file_category::{Category, ExtensionTable, extension_of};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Files grouped by category, plus extension diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ClassificationResult {
    buckets: BTreeMap<Category, Vec<PathBuf>>,
    /// Extensions that matched the table (lowercase, `""` for none).
    pub known_extensions: BTreeSet<String>,
    /// Extensions that fell through to [`Category::Other`].
    pub unknown_extensions: BTreeSet<String>,
    /// Files left alone because they already sit in a category directory.
    pub already_sorted: Vec<PathBuf>,
}

impl ClassificationResult {
    /// Files assigned to `category`, in discovery order.
    pub fn files(&self, category: Category) -> &[PathBuf] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Non-empty buckets in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PathBuf])> {
        self.buckets
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(category, files)| (*category, files.as_slice()))
    }

    /// Total number of classified files.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn push(&mut self, category: Category, file: PathBuf) {
        self.buckets.entry(category).or_default().push(file);
    }
}

/// Returns true if `file` sits directly inside `root/<category>`.
pub fn is_in_category_dir(root: &Path, file: &Path) -> bool {
    let Some(parent) = file.parent() else {
        return false;
    };
    if parent.parent() != Some(root) {
        return false;
    }
    parent
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(Category::from_dir_name)
        .is_some()
}

/// Assigns every file to exactly one category.
///
/// Files directly inside one of the root's category directories are recorded
/// in `already_sorted` and not bucketed, so running a sort twice moves nothing
/// the second time. Order within each bucket follows the input order.
///
/// # Examples
///
/// ```
/// use dirsort::classifier::classify;
/// use dirsort::file_category::{Category, ExtensionTable};
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/data");
/// let files = vec![
///     PathBuf::from("/data/song.MP3"),
///     PathBuf::from("/data/setup.exe"),
///     PathBuf::from("/data/music/old.mp3"),
/// ];
/// let result = classify(root, &files, &ExtensionTable::standard());
///
/// assert_eq!(result.files(Category::Music), &[PathBuf::from("/data/song.MP3")]);
/// assert_eq!(result.files(Category::Other), &[PathBuf::from("/data/setup.exe")]);
/// assert_eq!(result.already_sorted, vec![PathBuf::from("/data/music/old.mp3")]);
/// ```
pub fn classify(root: &Path, files: &[PathBuf], table: &ExtensionTable) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for file in files {
        if is_in_category_dir(root, file) {
            result.already_sorted.push(file.clone());
            continue;
        }

        let ext = extension_of(file);
        match table.lookup(&ext) {
            Some(category) => {
                result.known_extensions.insert(ext);
                result.push(category, file.clone());
            }
            None => {
                result.unknown_extensions.insert(ext);
                result.push(Category::Other, file.clone());
            }
        }
    }

    log::info!(
        "Classified {} files ({} already sorted)",
        result.total(),
        result.already_sorted.len()
    );
    result
}
