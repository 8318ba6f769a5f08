//! Error types shared by every stage of a sort run.
//!
//! Only [`SortError::InvalidRoot`] aborts a run. The other variants are
//! collected per file or per directory into the run's report.

use std::path::PathBuf;

/// Why a single file could not be relocated.
#[derive(Debug)]
pub enum MoveFailure {
    /// The filesystem refused the rename (permissions, vanished source, cross-device).
    Io(std::io::Error),
    /// No free destination name was found within the attempt limit.
    ResolverExhausted { attempts: usize },
    /// The source path has no final name component.
    NoFileName,
    /// The normalized name does not denote an entry inside the category directory.
    InvalidName(String),
}

impl std::fmt::Display for MoveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{}", e),
            Self::ResolverExhausted { attempts } => {
                write!(f, "no free file name after {} attempts", attempts)
            }
            Self::NoFileName => write!(f, "path has no file name component"),
            Self::InvalidName(name) => write!(f, "'{}' is not a usable file name", name),
        }
    }
}

/// Errors that can occur while sorting a directory.
#[derive(Debug)]
pub enum SortError {
    /// The target path is missing or not a directory.
    InvalidRoot { path: PathBuf, reason: String },
    /// A category directory could not be created.
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A single file could not be moved into its category directory.
    Move {
        source: PathBuf,
        destination: PathBuf,
        reason: MoveFailure,
    },
    /// A directory could not be removed while pruning.
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SortError {
    /// Returns true if this error must stop the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidRoot { .. })
    }
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path, reason } => {
                write!(f, "Invalid target directory {}: {}", path.display(), reason)
            }
            Self::DirectoryCreate { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::Move {
                source,
                destination,
                reason,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    reason
                )
            }
            Self::Prune { path, source } => {
                write!(
                    f,
                    "Failed to remove directory {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreate { source, .. } | Self::Prune { source, .. } => Some(source),
            Self::Move {
                reason: MoveFailure::Io(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

/// Result type for sort operations.
pub type SortResult<T> = Result<T, SortError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_only_invalid_root_is_fatal() {
        let root = SortError::InvalidRoot {
            path: PathBuf::from("/missing"),
            reason: "does not exist".to_string(),
        };
        let prune = SortError::Prune {
            path: PathBuf::from("/tmp/x"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(root.is_fatal());
        assert!(!prune.is_fatal());
    }

    #[test]
    fn test_move_error_display_and_source() {
        let err = SortError::Move {
            source: PathBuf::from("a.txt"),
            destination: PathBuf::from("notes/a.txt"),
            reason: MoveFailure::Io(io::Error::new(io::ErrorKind::NotFound, "gone")),
        };
        assert_eq!(err.to_string(), "Failed to move a.txt to notes/a.txt: gone");
        assert!(err.source().is_some());

        let exhausted = SortError::Move {
            source: PathBuf::from("a.txt"),
            destination: PathBuf::from("notes/a.txt"),
            reason: MoveFailure::ResolverExhausted { attempts: 3 },
        };
        assert!(exhausted.to_string().contains("no free file name after 3 attempts"));
        assert!(exhausted.source().is_none());
    }
}
