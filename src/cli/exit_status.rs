use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for scanner
/// tools.
///
/// - `Success` (0): Command completed, every file contributed to the report
/// - `Failure` (1): Command completed, but some files were skipped (parse errors)
/// - `Error` (2): Command failed due to internal error (bad config, invalid root)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, every file contributed to the report.
    Success,
    /// Command completed, but some files were skipped.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
