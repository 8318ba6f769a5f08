//! Command-line interface module for dirsort.
//!
//! This module handles:
//! - Argument parsing
//! - Logger setup
//! - Running the sort and reporting its outcome

use crate::config::SortConfig;
use crate::output::OutputFormatter;
use crate::sorter::{Progress, SortOptions, SortReport, sort_directory_with_progress};
use clap::Parser;
use indicatif::ProgressBar;
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

/// Sort a directory into category subdirectories.
#[derive(Debug, Parser)]
#[command(name = "dirsort", version, about)]
pub struct Args {
    /// Directory to sort
    pub target_dir: PathBuf,

    /// Show what would be moved without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./.dirsortrc.toml or ~/.config/dirsort/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// The command these arguments ask for.
    pub fn command(&self) -> SortCommand {
        if self.dry_run {
            SortCommand::DryRun
        } else {
            SortCommand::Sort
        }
    }

    /// Picks the log level: `-q` and `-v` win over the configuration file.
    pub fn log_level(&self, config: &SortConfig) -> Result<LevelFilter, String> {
        if self.quiet {
            return Ok(LevelFilter::Error);
        }
        match self.verbose {
            0 => config.log_level().map_err(|e| e.to_string()),
            1 => Ok(LevelFilter::Info),
            2 => Ok(LevelFilter::Debug),
            _ => Ok(LevelFilter::Trace),
        }
    }
}

/// What to do with the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCommand {
    /// Move files and prune empty directories.
    Sort,
    /// Report the planned moves without touching anything.
    DryRun,
}

/// Installs the terminal logger on stderr.
pub fn init_logging(level: LevelFilter) {
    if let Err(e) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: could not initialise logging: {}", e);
    }
}

/// Runs a sort with the default configuration.
///
/// ```no_run
/// use dirsort::cli::{run_cli, SortCommand};
/// use std::path::Path;
///
/// match run_cli(SortCommand::Sort, Path::new("/path/to/directory")) {
///     Ok(report) => println!("{} files moved", report.moves.moved.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(command: SortCommand, dir_path: &Path) -> Result<SortReport, String> {
    run_cli_with_config(command, dir_path, &SortConfig::default())
}

/// Runs a sort with the given configuration and prints the outcome.
///
/// Returns `Err` only when the run could not start: an invalid target
/// directory or invalid filter rules. Per-file failures are printed and
/// left in the returned report.
pub fn run_cli_with_config(
    command: SortCommand,
    dir_path: &Path,
    config: &SortConfig,
) -> Result<SortReport, String> {
    let filter = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;
    let options = SortOptions {
        dry_run: command == SortCommand::DryRun,
        filter,
        ..SortOptions::default()
    };

    match command {
        SortCommand::Sort => OutputFormatter::info(&format!("Sorting {}", dir_path.display())),
        SortCommand::DryRun => {
            OutputFormatter::dry_run_notice(&format!("Analyzing {}", dir_path.display()))
        }
    }

    let mut progress: Option<ProgressBar> = None;
    let report = sort_directory_with_progress(dir_path, &options, |event| match event {
        Progress::Classified { total } if command == SortCommand::Sort && total > 0 => {
            progress = Some(OutputFormatter::create_progress_bar(total as u64));
        }
        Progress::FileDone(file) => {
            if let Some(pb) = &progress {
                pb.set_message(
                    file.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                );
                pb.inc(1);
            }
        }
        _ => {}
    })
    .map_err(|e| e.to_string())?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    print_report(&report, dir_path);
    Ok(report)
}

fn print_report(report: &SortReport, dir_path: &Path) {
    if report.dry_run {
        print_plan(report, dir_path);
    }

    if report.classification.is_empty() {
        OutputFormatter::plain("No files to sort.");
    } else {
        OutputFormatter::summary_table(&report.category_counts());
        OutputFormatter::extensions(
            &report.classification.known_extensions,
            &report.classification.unknown_extensions,
        );
    }

    let skipped = report.classification.already_sorted.len();
    if skipped > 0 {
        OutputFormatter::plain(&format!("Already sorted: {} left in place", skipped));
    }
    if !report.excluded.is_empty() {
        OutputFormatter::plain(&format!(
            "Excluded by filters: {} left in place",
            report.excluded.len()
        ));
    }
    if !report.dry_run && !report.prune.removed.is_empty() {
        OutputFormatter::plain(&format!(
            "Removed {} empty directories",
            report.prune.removed.len()
        ));
    }

    if report.has_errors() {
        OutputFormatter::header("ERRORS");
        for err in report.errors() {
            OutputFormatter::error(&err.to_string());
        }
        OutputFormatter::warning("Some entries could not be processed. Re-run to retry them.");
    } else if report.dry_run {
        OutputFormatter::success("Dry run complete. No files were modified.");
    } else {
        OutputFormatter::success("Sort complete.");
    }
}

fn print_plan(report: &SortReport, dir_path: &Path) {
    OutputFormatter::header("PLANNED MOVES");
    for planned in &report.moves.moved {
        let from = planned
            .source
            .strip_prefix(dir_path)
            .unwrap_or(&planned.source);
        let to = planned
            .destination
            .strip_prefix(dir_path)
            .unwrap_or(&planned.destination);
        OutputFormatter::plain(&format!(" - {} → {}", from.display(), to.display()));
    }
}
