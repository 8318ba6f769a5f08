//! Output formatting and styling module.
//!
//! All user-facing terminal output goes through [`OutputFormatter`]. Diagnostic
//! logging goes through the `log` facade instead.

use crate::file_category::Category;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, BTreeSet};

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// OutputFormatter::error("Failed to move file");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for the move phase.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints per-category file counts in category order, followed by a total.
    ///
    /// ```no_run
    /// use dirsort::file_category::Category;
    /// use dirsort::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert(Category::Pictures, 8);
    /// counts.insert(Category::Documents, 15);
    /// OutputFormatter::summary_table(&counts);
    /// ```
    pub fn summary_table(category_counts: &BTreeMap<Category, usize>) {
        Self::header("SUMMARY");

        let total_files: usize = category_counts.values().sum();
        let width = category_counts
            .keys()
            .map(|c| c.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in category_counts {
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural(total_files),
            width = width
        );
    }

    /// Prints the extensions seen, split into recognized and unrecognized.
    pub fn extensions(known: &BTreeSet<String>, unknown: &BTreeSet<String>) {
        Self::plain(&format!("Known extensions:   {}", format_extensions(known)));
        if !unknown.is_empty() {
            Self::plain(&format!(
                "Unknown extensions: {}",
                format_extensions(unknown).yellow()
            ));
        }
    }

    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

/// Formats extensions as `.ext` tokens; files without an extension show as `(none)`.
fn format_extensions(extensions: &BTreeSet<String>) -> String {
    if extensions.is_empty() {
        return "-".to_string();
    }
    extensions
        .iter()
        .map(|ext| {
            if ext.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
