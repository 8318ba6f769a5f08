//! The sort pipeline.
//!
//! Stages run strictly one after another and hand their results to the next:
//! walk, filter, classify, move, prune. Nothing is shared between stages
//! except the returned values.

use crate::classifier::{ClassificationResult, classify};
use crate::config::FileFilter;
use crate::error::{SortError, SortResult};
use crate::file_category::{Category, ExtensionTable};
use crate::file_organizer::{FileOrganizer, MoveReport};
use crate::pruner::{PruneReport, prune};
use crate::walker;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings for one sort run.
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Plan the moves without touching the filesystem.
    pub dry_run: bool,
    /// Decides which discovered files take part.
    pub filter: FileFilter,
    pub table: ExtensionTable,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            filter: FileFilter::allow_all(),
            table: ExtensionTable::standard(),
        }
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// Classification finished; `total` files are about to be moved.
    Classified { total: usize },
    /// One file has been handled, successfully or not.
    FileDone(&'a Path),
}

/// Everything that happened during a run.
#[derive(Debug, Default)]
pub struct SortReport {
    pub dry_run: bool,
    /// Files left out by the configured filters.
    pub excluded: Vec<PathBuf>,
    pub classification: ClassificationResult,
    /// Performed moves, or planned ones for a dry run.
    pub moves: MoveReport,
    /// Empty for a dry run.
    pub prune: PruneReport,
}

impl SortReport {
    /// All non-fatal errors, move phase first.
    pub fn errors(&self) -> impl Iterator<Item = &SortError> {
        self.moves.errors.iter().chain(self.prune.errors.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Number of files moved (or planned) per category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for moved in &self.moves.moved {
            *counts.entry(moved.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Sorts `root` in place.
///
/// # Errors
///
/// Only [`SortError::InvalidRoot`] is returned; every other failure is
/// collected into the report.
///
/// # Examples
///
/// ```no_run
/// use dirsort::sorter::{SortOptions, sort_directory};
/// use std::path::Path;
///
/// let report = sort_directory(Path::new("/home/user/Downloads"), &SortOptions::default())?;
/// for err in report.errors() {
///     eprintln!("{}", err);
/// }
/// # Ok::<(), dirsort::SortError>(())
/// ```
pub fn sort_directory(root: &Path, options: &SortOptions) -> SortResult<SortReport> {
    sort_directory_with_progress(root, options, |_| {})
}

/// Like [`sort_directory`], reporting progress through `on_progress`.
pub fn sort_directory_with_progress<F>(
    root: &Path,
    options: &SortOptions,
    mut on_progress: F,
) -> SortResult<SortReport>
where
    F: FnMut(Progress<'_>),
{
    let found = walker::walk(root)?;

    let (files, excluded): (Vec<PathBuf>, Vec<PathBuf>) = found
        .files
        .into_iter()
        .partition(|f| options.filter.should_include(root, f));
    if !excluded.is_empty() {
        log::info!("{} files excluded by filters", excluded.len());
    }

    let classification = classify(root, &files, &options.table);
    on_progress(Progress::Classified {
        total: classification.total(),
    });

    let mut report = SortReport {
        dry_run: options.dry_run,
        excluded,
        ..SortReport::default()
    };

    if options.dry_run {
        report.moves = FileOrganizer::plan(root, &classification);
        for moved in &report.moves.moved {
            on_progress(Progress::FileDone(&moved.source));
        }
    } else {
        report.moves = FileOrganizer::organize(root, &classification, |file| {
            on_progress(Progress::FileDone(file))
        });
        report.prune = prune(root)?;
    }

    report.classification = classification;
    Ok(report)
}
