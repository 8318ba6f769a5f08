/// File categories and the static extension table.
///
/// Categories double as directory names under the sorted root. The table is an
/// ordered association list so lookups are first-match-wins and iteration is
/// deterministic.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::{Category, ExtensionTable};
///
/// let table = ExtensionTable::standard();
/// assert_eq!(table.lookup("mp4"), Some(Category::Videos));
/// assert_eq!(table.lookup("JPG"), Some(Category::Pictures));
/// assert_eq!(table.lookup(""), Some(Category::Notes));
/// assert_eq!(table.lookup("xyz"), None);
/// ```
use std::path::Path;

use crate::normalize::split_name;

/// Represents a file category.
///
/// The declaration order is the table order and the order categories are
/// processed in when moving files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Video files (MP4, MKV, AVI, etc.)
    Videos,
    /// Image files (JPG, PNG, SVG, etc.)
    Pictures,
    /// Document files (PDF, DOCX, XLSX, etc.)
    Documents,
    /// Audio files (MP3, FLAC, OGG, etc.)
    Music,
    /// Archive files (ZIP, 7Z, TAR, etc.)
    Archives,
    /// Plain notes, including files without an extension
    Notes,
    /// Disk images (ISO, IMG)
    IsoImg,
    /// Anything the table does not recognize
    Other,
}

impl Category {
    /// Every category, in table order, with `Other` last.
    pub const ALL: [Category; 8] = [
        Category::Videos,
        Category::Pictures,
        Category::Documents,
        Category::Music,
        Category::Archives,
        Category::Notes,
        Category::IsoImg,
        Category::Other,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::Pictures.dir_name(), "pictures");
    /// assert_eq!(Category::IsoImg.dir_name(), "iso-img");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Videos => "videos",
            Category::Pictures => "pictures",
            Category::Documents => "documents",
            Category::Music => "music",
            Category::Archives => "archives",
            Category::Notes => "notes",
            Category::IsoImg => "iso-img",
            Category::Other => "other",
        }
    }

    /// Parses a directory name back into a category. Matching is exact.
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.dir_name() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One row of an [`ExtensionTable`].
pub type TableEntry = (Category, &'static [&'static str]);

const STANDARD_TABLE: &[TableEntry] = &[
    (
        Category::Videos,
        &[
            "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "mpeg", "mpg", "3gp",
        ],
    ),
    (
        Category::Pictures,
        &[
            "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "tif", "tiff", "ico",
        ],
    ),
    (
        Category::Documents,
        &[
            "doc", "docx", "pdf", "rtf", "odt", "ods", "odp", "ppt", "pptx", "xls", "xlsx", "csv",
            "xml", "html", "htm", "tex",
        ],
    ),
    (
        Category::Music,
        &[
            "mp3", "wav", "wma", "ogg", "flac", "aac", "amr", "m4a", "m3u", "mid",
        ],
    ),
    (
        Category::Archives,
        &["zip", "7z", "tar", "gz", "bz2", "xz", "tgz", "tbz2"],
    ),
    (Category::Notes, &["", "md", "txt"]),
    (Category::IsoImg, &["iso", "img"]),
];

/// Maps lowercase extensions to categories.
///
/// Extensions are stored lowercase; the empty string stands for files without
/// an extension.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionTable {
    entries: &'static [TableEntry],
}

impl ExtensionTable {
    /// The built-in table.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_TABLE,
        }
    }

    /// Builds a table from a custom ordered list.
    pub fn new(entries: &'static [TableEntry]) -> Self {
        Self { entries }
    }

    /// Returns the first category declaring `ext`, compared case-insensitively.
    pub fn lookup(&self, ext: &str) -> Option<Category> {
        let ext = ext.to_lowercase();
        self.entries
            .iter()
            .find(|(_, extensions)| extensions.iter().any(|e| *e == ext))
            .map(|(category, _)| *category)
    }

    /// Iterates over the table in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for ExtensionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns the lowercase extension of a path's file name, or `""` if it has none.
///
/// ```
/// use dirsort::file_category::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("/tmp/Movie.MKV")), "mkv");
/// assert_eq!(extension_of(Path::new("/tmp/README")), "");
/// assert_eq!(extension_of(Path::new("/tmp/.bashrc")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    split_name(&name)
        .1
        .map(str::to_lowercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Videos.dir_name(), "videos");
        assert_eq!(Category::Pictures.dir_name(), "pictures");
        assert_eq!(Category::Documents.dir_name(), "documents");
        assert_eq!(Category::Music.dir_name(), "music");
        assert_eq!(Category::Archives.dir_name(), "archives");
        assert_eq!(Category::Notes.dir_name(), "notes");
        assert_eq!(Category::IsoImg.dir_name(), "iso-img");
        assert_eq!(Category::Other.dir_name(), "other");
    }

    #[test]
    fn test_from_dir_name_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_dir_name(category.dir_name()), Some(category));
        }
        assert_eq!(Category::from_dir_name("Videos"), None);
        assert_eq!(Category::from_dir_name("downloads"), None);
    }

    #[test]
    fn test_every_table_extension_maps_to_its_category() {
        let table = ExtensionTable::standard();
        for (category, extensions) in table.entries() {
            for ext in extensions {
                assert_eq!(table.lookup(ext), Some(category), "extension {:?}", ext);
                assert_eq!(
                    table.lookup(&ext.to_uppercase()),
                    Some(category),
                    "extension {:?}",
                    ext
                );
            }
        }
    }

    #[test]
    fn test_other_is_not_in_table() {
        let table = ExtensionTable::standard();
        assert!(table.entries().all(|(c, _)| c != Category::Other));
        assert_eq!(table.lookup("xyz"), None);
        assert_eq!(table.lookup("exe"), None);
    }

    #[test]
    fn test_first_match_wins() {
        static TABLE: &[TableEntry] = &[
            (Category::Documents, &["txt"]),
            (Category::Notes, &["txt", "md"]),
        ];
        let table = ExtensionTable::new(TABLE);
        assert_eq!(table.lookup("txt"), Some(Category::Documents));
        assert_eq!(table.lookup("md"), Some(Category::Notes));
    }

    #[test]
    fn test_extension_of_edge_cases() {
        assert_eq!(extension_of(Path::new("archive.tar.GZ")), "gz");
        assert_eq!(extension_of(Path::new("noext")), "");
        assert_eq!(extension_of(Path::new(".hidden")), "");
        assert_eq!(extension_of(Path::new("trailing.")), "");
    }
}
