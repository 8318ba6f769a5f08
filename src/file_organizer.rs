/// Moving classified files into category directories.
///
/// Each file is renamed to its normalized name inside `root/<category>`, with
/// a `_N` counter appended when the name is already taken. Failures are
/// recorded per file and never abort the batch.
use crate::classifier::ClassificationResult;
use crate::error::{MoveFailure, SortError, SortResult};
use crate::file_category::Category;
use crate::normalize::{SEPARATOR, normalize, split_name};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound on counter suffixes tried for one destination.
pub const MAX_COLLISION_ATTEMPTS: usize = 10_000;

/// A single file relocation, performed or planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    /// Where the file was before the move.
    pub source: PathBuf,
    /// Where the file is (or would be) after the move.
    pub destination: PathBuf,
    /// The category the file was moved to.
    pub category: Category,
}

/// Outcome of the move phase.
#[derive(Debug, Default)]
pub struct MoveReport {
    /// Successful (or, for a dry run, planned) moves in processing order.
    pub moved: Vec<MovedFile>,
    /// Directory-creation and per-file move failures.
    pub errors: Vec<SortError>,
}

impl MoveReport {
    pub fn is_complete_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Returns true if anything, including a dangling symlink, exists at `path`.
fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Returns `candidate` if it is free, otherwise the first free `<stem>_<n>.<ext>`.
///
/// The filesystem is consulted again for every candidate.
///
/// # Errors
///
/// Returns a [`SortError::Move`] with [`MoveFailure::ResolverExhausted`] if no
/// free name is found within [`MAX_COLLISION_ATTEMPTS`] tries.
pub fn resolve_collision(candidate: &Path) -> SortResult<PathBuf> {
    resolve_collision_with(candidate, entry_exists)
}

/// Like [`resolve_collision`], with a caller-supplied occupancy check.
///
/// ```
/// use dirsort::file_organizer::resolve_collision_with;
/// use std::path::{Path, PathBuf};
///
/// let taken = [PathBuf::from("/d/a.txt"), PathBuf::from("/d/a_1.txt")];
/// let free = resolve_collision_with(Path::new("/d/a.txt"), |p| taken.iter().any(|t| t == p))
///     .unwrap();
/// assert_eq!(free, PathBuf::from("/d/a_2.txt"));
/// ```
pub fn resolve_collision_with<F>(candidate: &Path, mut is_taken: F) -> SortResult<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    if !is_taken(candidate) {
        return Ok(candidate.to_path_buf());
    }

    let file_name = candidate
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| SortError::Move {
            source: candidate.to_path_buf(),
            destination: candidate.to_path_buf(),
            reason: MoveFailure::NoFileName,
        })?;
    let (stem, ext) = split_name(&file_name);

    for counter in 1..=MAX_COLLISION_ATTEMPTS {
        let name = match ext {
            Some(ext) => format!("{}{}{}.{}", stem, SEPARATOR, counter, ext),
            None => format!("{}{}{}", stem, SEPARATOR, counter),
        };
        let next = candidate.with_file_name(name);
        if !is_taken(&next) {
            return Ok(next);
        }
    }

    Err(SortError::Move {
        source: candidate.to_path_buf(),
        destination: candidate.to_path_buf(),
        reason: MoveFailure::ResolverExhausted {
            attempts: MAX_COLLISION_ATTEMPTS,
        },
    })
}

/// Computes the normalized, not-yet-resolved destination for `file_path`.
///
/// The result is always a direct child of `category_path`.
fn normalized_destination(category_path: &Path, file_path: &Path) -> SortResult<PathBuf> {
    let file_name = file_path.file_name().ok_or_else(|| SortError::Move {
        source: file_path.to_path_buf(),
        destination: category_path.to_path_buf(),
        reason: MoveFailure::NoFileName,
    })?;
    let name = normalize(&file_name.to_string_lossy());
    let candidate = category_path.join(&name);
    if candidate.file_name() != Some(OsStr::new(&name)) || candidate.parent() != Some(category_path)
    {
        return Err(SortError::Move {
            source: file_path.to_path_buf(),
            destination: candidate,
            reason: MoveFailure::InvalidName(name),
        });
    }
    Ok(candidate)
}

/// Moves files into category subdirectories of a base directory.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Creates `base_path/<category>` if it is not already a directory.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::DirectoryCreate`] if the directory cannot be created,
    /// for example because a regular file already has that name.
    pub fn ensure_category_dir(base_path: &Path, category: Category) -> SortResult<PathBuf> {
        let category_path = base_path.join(category.dir_name());
        if !category_path.is_dir() {
            fs::create_dir(&category_path).map_err(|e| SortError::DirectoryCreate {
                path: category_path.clone(),
                source: e,
            })?;
            log::debug!("Created {}", category_path.display());
        }
        Ok(category_path)
    }

    /// Moves one file into an existing category directory under its normalized name.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Move`] if no free name exists or the rename fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_category::Category;
    /// use dirsort::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let moved = FileOrganizer::move_file(
    ///     Path::new("/data/pictures"),
    ///     Path::new("/data/inbox/My Photo.JPG"),
    ///     Category::Pictures,
    /// );
    /// match moved {
    ///     Ok(m) => println!("{} -> {}", m.source.display(), m.destination.display()),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn move_file(
        category_path: &Path,
        file_path: &Path,
        category: Category,
    ) -> SortResult<MovedFile> {
        let candidate = normalized_destination(category_path, file_path)?;
        let destination = resolve_collision(&candidate).map_err(|e| match e {
            SortError::Move { reason, .. } => SortError::Move {
                source: file_path.to_path_buf(),
                destination: candidate.clone(),
                reason,
            },
            other => other,
        })?;

        fs::rename(file_path, &destination).map_err(|e| SortError::Move {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            reason: MoveFailure::Io(e),
        })?;

        log::debug!("Moved {} -> {}", file_path.display(), destination.display());
        Ok(MovedFile {
            source: file_path.to_path_buf(),
            destination,
            category,
        })
    }

    /// Moves every classified file into its category directory under `base_path`.
    ///
    /// Categories are processed in table order. A category whose directory
    /// cannot be created is skipped; a file that cannot be moved is recorded
    /// and the batch continues. `on_progress` is called once per file attempted.
    pub fn organize<P>(
        base_path: &Path,
        classification: &ClassificationResult,
        mut on_progress: P,
    ) -> MoveReport
    where
        P: FnMut(&Path),
    {
        let mut report = MoveReport::default();

        for (category, files) in classification.iter() {
            let category_path = match Self::ensure_category_dir(base_path, category) {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("{}; skipping {} files", e, files.len());
                    report.errors.push(e);
                    for file in files {
                        on_progress(file);
                    }
                    continue;
                }
            };

            for file in files {
                match Self::move_file(&category_path, file, category) {
                    Ok(moved) => report.moved.push(moved),
                    Err(e) => {
                        log::warn!("{}", e);
                        report.errors.push(e);
                    }
                }
                on_progress(file);
            }
        }

        log::info!(
            "Moved {} files with {} failures",
            report.moved.len(),
            report.errors.len()
        );
        report
    }

    /// Computes where every classified file would go, without touching the filesystem.
    ///
    /// Destinations are resolved against both existing entries and the
    /// destinations already planned in this call, so two files with the same
    /// normalized name get distinct planned paths.
    pub fn plan(base_path: &Path, classification: &ClassificationResult) -> MoveReport {
        let mut report = MoveReport::default();
        let mut planned: HashSet<PathBuf> = HashSet::new();

        for (category, files) in classification.iter() {
            let category_path = base_path.join(category.dir_name());
            for file in files {
                let resolved = normalized_destination(&category_path, file).and_then(|candidate| {
                    resolve_collision_with(&candidate, |p| {
                        planned.contains(p) || entry_exists(p)
                    })
                });
                match resolved {
                    Ok(destination) => {
                        planned.insert(destination.clone());
                        report.moved.push(MovedFile {
                            source: file.clone(),
                            destination,
                            category,
                        });
                    }
                    Err(e) => report.errors.push(e),
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::file_category::ExtensionTable;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_collision_free_path_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let candidate = temp_dir.path().join("free.txt");
        assert_eq!(resolve_collision(&candidate).unwrap(), candidate);
    }

    #[test]
    fn test_resolve_collision_counts_up() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();
        fs::write(dir.join("a.txt"), "0").unwrap();
        fs::write(dir.join("a_1.txt"), "1").unwrap();

        assert_eq!(resolve_collision(&dir.join("a.txt")).unwrap(), dir.join("a_2.txt"));
    }

    #[test]
    fn test_resolve_collision_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();
        fs::write(dir.join("readme"), "0").unwrap();

        assert_eq!(resolve_collision(&dir.join("readme")).unwrap(), dir.join("readme_1"));
    }

    #[test]
    fn test_resolve_collision_exhausted() {
        let err = resolve_collision_with(Path::new("/d/a.txt"), |_| true)
            .expect_err("every name is taken");
        assert!(matches!(
            err,
            SortError::Move {
                reason: MoveFailure::ResolverExhausted { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_ensure_category_dir_creates_and_reuses() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        let created = FileOrganizer::ensure_category_dir(base, Category::Music).unwrap();
        assert!(created.is_dir());
        let reused = FileOrganizer::ensure_category_dir(base, Category::Music).unwrap();
        assert_eq!(created, reused);
    }

    #[test]
    fn test_ensure_category_dir_blocked_by_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("videos"), "not a dir").unwrap();

        let err = FileOrganizer::ensure_category_dir(base, Category::Videos).unwrap_err();
        assert!(matches!(err, SortError::DirectoryCreate { .. }));
    }

    #[test]
    fn test_move_file_normalizes_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let source = base.join("Мой Файл!.TXT");
        fs::write(&source, "hello").unwrap();
        let notes = FileOrganizer::ensure_category_dir(base, Category::Notes).unwrap();

        let moved = FileOrganizer::move_file(&notes, &source, Category::Notes).unwrap();

        assert_eq!(moved.destination, notes.join("moi_fail.txt"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&moved.destination).unwrap(), "hello");
    }

    #[test]
    fn test_move_file_vanished_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let notes = FileOrganizer::ensure_category_dir(base, Category::Notes).unwrap();

        let err = FileOrganizer::move_file(&notes, &base.join("gone.txt"), Category::Notes)
            .unwrap_err();
        assert!(matches!(
            err,
            SortError::Move {
                reason: MoveFailure::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_organize_collisions_keep_every_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("x")).unwrap();
        fs::create_dir_all(base.join("y")).unwrap();
        let files = vec![
            base.join("Report.PDF"),
            base.join("x/report.pdf"),
            base.join("y/REPORT.pdf"),
        ];
        for (i, f) in files.iter().enumerate() {
            fs::write(f, format!("content {}", i)).unwrap();
        }

        let classification = classify(base, &files, &ExtensionTable::standard());
        let mut seen = 0;
        let report = FileOrganizer::organize(base, &classification, |_| seen += 1);

        assert!(report.is_complete_success());
        assert_eq!(seen, 3);
        let docs = base.join("documents");
        for (i, name) in ["report.pdf", "report_1.pdf", "report_2.pdf"].iter().enumerate() {
            assert_eq!(
                fs::read_to_string(docs.join(name)).unwrap(),
                format!("content {}", i)
            );
        }
    }

    #[test]
    fn test_organize_skips_category_when_dir_cannot_be_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("music"), "blocking file").unwrap();
        let files = vec![base.join("song.mp3"), base.join("note.txt")];
        for f in &files {
            fs::write(f, "x").unwrap();
        }

        let classification = classify(base, &files, &ExtensionTable::standard());
        let report = FileOrganizer::organize(base, &classification, |_| {});

        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], SortError::DirectoryCreate { .. }));
        assert!(base.join("song.mp3").exists());
        assert!(base.join("notes/note.txt").exists());
    }

    #[test]
    fn test_normalized_destination_stays_inside_category() {
        let category_path = Path::new("/data/notes");
        for name in [".!", " .", "!.."] {
            let dest = normalized_destination(category_path, &Path::new("/data/in").join(name))
                .expect("dot-only names fall back to the placeholder");
            assert_eq!(dest, category_path.join("unnamed"), "name {:?}", name);
        }
    }

    #[test]
    fn test_dot_only_names_land_in_category_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("sub")).unwrap();
        let files = vec![base.join("sub/.!"), base.join("sub/!..")];
        for f in &files {
            fs::write(f, "x").unwrap();
        }

        let classification = classify(base, &files, &ExtensionTable::standard());
        let report = FileOrganizer::organize(base, &classification, |_| {});

        assert!(report.is_complete_success());
        let notes = base.join("notes");
        for moved in &report.moved {
            assert_eq!(moved.destination.parent(), Some(notes.as_path()));
        }
        assert!(notes.join("unnamed").exists());
        assert!(notes.join("unnamed_1").exists());
        assert!(!base.join("notes_1").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_organize_continues_after_a_failed_move() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("locked")).unwrap();
        fs::create_dir_all(base.join("open")).unwrap();
        let files = vec![base.join("locked/a.txt"), base.join("open/b.txt")];
        for f in &files {
            fs::write(f, "x").unwrap();
        }
        fs::set_permissions(base.join("locked"), fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores directory permissions.
        if fs::write(base.join("locked/write_check"), "").is_ok() {
            fs::set_permissions(base.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let classification = classify(base, &files, &ExtensionTable::standard());
        let report = FileOrganizer::organize(base, &classification, |_| {});
        fs::set_permissions(base.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            &report.errors[0],
            SortError::Move { source, reason: MoveFailure::Io(_), .. } if source == &files[0]
        ));
        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.moved[0].destination, base.join("notes/b.txt"));
        assert!(base.join("locked/a.txt").exists());
    }

    #[test]
    fn test_plan_does_not_touch_filesystem() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let files = vec![base.join("A.txt"), base.join("a.TXT")];
        for f in &files {
            fs::write(f, "x").unwrap();
        }

        let classification = classify(base, &files, &ExtensionTable::standard());
        let report = FileOrganizer::plan(base, &classification);

        let destinations: Vec<_> = report.moved.iter().map(|m| m.destination.clone()).collect();
        assert_eq!(
            destinations,
            vec![base.join("notes/a.txt"), base.join("notes/a_1.txt")]
        );
        assert!(!base.join("notes").exists());
        assert!(files.iter().all(|f| f.exists()));
    }
}
