//! Issue types surfaced to the user after a scan.

/// A source file that could not be parsed.
///
/// Parse failures are non-fatal: the file simply contributes nothing to the
/// report. One issue is recorded per failing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    /// Path of the file that failed to parse.
    pub file_path: String,
    /// The parser's message.
    pub error: String,
}
