use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::issues::ParseErrorIssue;

/// Outcome of one CLI command, consumed by the reporter.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    /// Rendered report, when it goes to stdout.
    pub report: Option<String>,
    /// Destination file, when `--output` was given.
    pub output_path: Option<PathBuf>,
    pub files_scanned: usize,
    pub signature_count: usize,
    pub occurrence_count: usize,
    pub parse_errors: Vec<ParseErrorIssue>,
    /// Buffered warnings from the run (e.g. rejected formatters).
    pub warnings: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}
