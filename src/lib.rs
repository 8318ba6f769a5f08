//! dirsort - sort a directory tree into category subdirectories
//!
//! Files are classified by extension, renamed to a normalized lowercase form,
//! moved into `videos/`, `pictures/`, `documents/`, `music/`, `archives/`,
//! `notes/`, `iso-img/` or `other/` directly under the target directory, and
//! directories left empty are removed. Running it again on a sorted tree
//! moves nothing.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod normalize;
pub mod output;
pub mod pruner;
pub mod sorter;
pub mod walker;

pub use classifier::{ClassificationResult, classify};
pub use config::{ConfigError, FileFilter, SortConfig};
pub use error::{MoveFailure, SortError, SortResult};
pub use file_category::{Category, ExtensionTable};
pub use file_organizer::{FileOrganizer, MoveReport, MovedFile, resolve_collision};
pub use normalize::normalize;
pub use pruner::{PruneReport, prune};
pub use sorter::{SortOptions, SortReport, sort_directory};
pub use walker::{WalkResult, walk};

pub use cli::{SortCommand, run_cli};
