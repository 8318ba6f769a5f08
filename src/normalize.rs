//! File name normalization.
//!
//! Turns arbitrary file names into lowercase, separator-joined names that are
//! safe on every common filesystem. Cyrillic letters are transliterated to
//! Latin; everything else outside word characters, dots and hyphens is dropped.

use regex::Regex;
use std::sync::LazyLock;

/// Character used to join words and to suffix collision counters.
pub const SEPARATOR: char = '_';

/// Stem used when nothing survives normalization.
pub const PLACEHOLDER_STEM: &str = "unnamed";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.-]").expect("valid disallowed-characters regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_-]+").expect("valid separator regex"));

/// Splits a file name into stem and extension at the final dot.
///
/// A leading dot does not start an extension (`.bashrc` has none) and a
/// trailing dot yields no extension.
///
/// ```
/// use dirsort::normalize::split_name;
///
/// assert_eq!(split_name("photo.JPG"), ("photo", Some("JPG")));
/// assert_eq!(split_name("a.tar.gz"), ("a.tar", Some("gz")));
/// assert_eq!(split_name(".bashrc"), (".bashrc", None));
/// assert_eq!(split_name("README"), ("README", None));
/// ```
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Normalizes a file name.
///
/// The stem is stripped of disallowed characters, transliterated, has its
/// whitespace and separator runs collapsed to a single `_` and is trimmed. The
/// extension is reattached and the whole name lowercased. A stem that ends up
/// empty or made only of dots becomes [`PLACEHOLDER_STEM`], so the result is
/// never `.` or `..`.
///
/// ```
/// use dirsort::normalize::normalize;
///
/// assert_eq!(normalize("Тест  File--Name!!.TXT"), "test_file_name.txt");
/// assert_eq!(normalize("My Holiday (2019).JPG"), "my_holiday_2019.jpg");
/// ```
pub fn normalize(name: &str) -> String {
    let (stem, ext) = split_name(name);

    let stripped = DISALLOWED.replace_all(stem, "");
    let transliterated = transliterate(&stripped);
    let spaced = WHITESPACE_RUN.replace_all(&transliterated, "_");
    let collapsed = SEPARATOR_RUN.replace_all(&spaced, "_");
    let trimmed = collapsed.trim_matches(SEPARATOR);

    let stem = if trimmed.chars().all(|c| c == '.') {
        PLACEHOLDER_STEM
    } else {
        trimmed
    };

    match ext {
        Some(ext) => format!("{}.{}", stem, ext).to_lowercase(),
        None => stem.to_lowercase(),
    }
}

/// Replaces every tabled character with its Latin spelling.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "y",
        'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "ji",
        'ґ' => "g",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' | 'Ё' => "E",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "Y",
        'Й' => "I",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "H",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Shch",
        'Ъ' | 'Ь' => "",
        'Ы' => "Y",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        'Є' => "Ye",
        'І' => "I",
        'Ї' => "Ji",
        'Ґ' => "G",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        assert_eq!(normalize("Тест  File--Name!!.TXT"), "test_file_name.txt");
    }

    #[test]
    fn test_transliteration_multi_letter() {
        assert_eq!(normalize("Щука Юля.mp3"), "shchuka_yulya.mp3");
        assert_eq!(normalize("Їжак і ґава.txt"), "jizhak_i_gava.txt");
        assert_eq!(normalize("объём.doc"), "obem.doc");
    }

    #[test]
    fn test_untabled_characters_pass_through() {
        assert_eq!(normalize("Ελλάδα.png"), "ελλάδα.png");
        assert_eq!(normalize("café.md"), "café.md");
    }

    #[test]
    fn test_separators_collapse_and_trim() {
        assert_eq!(normalize("  __a - - b__  .pdf"), "a_b.pdf");
        assert_eq!(normalize("one\ttwo\nthree.txt"), "one_two_three.txt");
        assert_eq!(normalize("--lead-and-trail--.zip"), "lead_and_trail.zip");
    }

    #[test]
    fn test_inner_dots_are_kept() {
        assert_eq!(normalize("Backup.2024.tar.GZ"), "backup.2024.tar.gz");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(normalize("Read Me"), "read_me");
        assert_eq!(normalize(".Bash Profile"), ".bash_profile");
    }

    #[test]
    fn test_empty_stem_uses_placeholder() {
        assert_eq!(normalize("!!!.txt"), "unnamed.txt");
        assert_eq!(normalize("___"), "unnamed");
        assert_eq!(normalize(""), "unnamed");
    }

    #[test]
    fn test_dot_only_stem_uses_placeholder() {
        assert_eq!(normalize(".!"), "unnamed");
        assert_eq!(normalize(" ."), "unnamed");
        assert_eq!(normalize("!.."), "unnamed");
        assert_eq!(normalize("..txt"), "unnamed.txt");
        assert_eq!(normalize(".Hidden"), ".hidden");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in [
            "Тест  File--Name!!.TXT",
            "My Holiday (2019).JPG",
            "!!!.txt",
            ".!",
        ] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_split_name_trailing_dot() {
        assert_eq!(split_name("file."), ("file.", None));
        assert_eq!(split_name("."), (".", None));
    }
}
