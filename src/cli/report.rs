//! Report printing utilities.
//!
//! Renders command results to the terminal. The usage report itself is the
//! only thing written to stdout, so `calldoc scan --format json` can be
//! piped; warnings, per-file errors, and the summary line go to stderr.
//! Separate from core logic so calldoc can be used as a library without
//! pulling in terminal output.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout/stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, verbose),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_scan(summary: &ScanSummary, verbose: bool) {
    if let Some(report) = &summary.report
        && !report.is_empty()
    {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{report}");
    }

    for warning in &summary.warnings {
        eprintln!("{} {}", "warning:".bold().yellow(), warning);
    }

    for issue in &summary.parse_errors {
        eprintln!("{} {}", "error:".bold().red(), issue.error);
    }

    if let Some(path) = &summary.output_path {
        eprintln!("Report written to {}", path.display());
    }

    let counts = format!(
        "Scanned {} source {}, found {} call {} ({} {})",
        summary.files_scanned,
        pluralize(summary.files_scanned, "file", "files"),
        summary.signature_count,
        pluralize(summary.signature_count, "signature", "signatures"),
        summary.occurrence_count,
        pluralize(summary.occurrence_count, "occurrence", "occurrences"),
    );

    if summary.parse_errors.is_empty() {
        eprintln!("{} {}", SUCCESS_MARK.green(), counts.green());
    } else {
        let failed = format!(
            "{counts}; {} {} failed to parse",
            summary.parse_errors.len(),
            pluralize(summary.parse_errors.len(), "file", "files"),
        );
        eprintln!("{} {}", FAILURE_MARK.red(), failed.red());
    }

    if verbose && summary.signature_count == 0 {
        eprintln!("Note: no registered call sites were found under the scanned root");
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!("{} Created {}", SUCCESS_MARK.green(), CONFIG_FILE_NAME);
    }
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
