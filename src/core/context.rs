//! Scan orchestration.
//!
//! `Documentor` owns one run: scan the root for PHP files, parse and collect
//! each file, merge per-file usages in deterministic file order, and finalize
//! the result. Per-file reading, parsing, and collection run in parallel with
//! rayon; the pattern registry and formatter chain are read-only and shared
//! across workers, and the merge into the single accumulator is sequential.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use log::Level;
use rayon::prelude::*;

use crate::core::collector::CallSiteCollector;
use crate::core::file_scanner::scan_files;
use crate::core::formatter::FormatterChain;
use crate::core::matcher::CallPatterns;
use crate::core::parsers::php::parse_php_source;
use crate::core::usage_map::{UsageAccumulator, UsageMap};
use crate::issues::ParseErrorIssue;
use crate::logbuf::LogBuffer;

/// Output of [`Documentor::retrieve`].
#[derive(Debug)]
pub struct RetrieveResult {
    /// Aggregated call-site usages.
    pub usages: UsageMap,
    /// Files that failed to parse (one issue per file).
    pub parse_errors: Vec<ParseErrorIssue>,
    /// Number of source files scanned (including failing ones).
    pub files_scanned: usize,
}

/// Documents usages of registered call patterns under a source root.
pub struct Documentor {
    root: PathBuf,
    patterns: CallPatterns,
    chain: FormatterChain,
    excluded_directories: Vec<String>,
    sorting: bool,
    verbose: bool,
    logbuf: LogBuffer,
}

impl Documentor {
    pub fn new(root: impl Into<PathBuf>, patterns: CallPatterns) -> Self {
        Self {
            root: root.into(),
            patterns,
            chain: FormatterChain::empty(),
            excluded_directories: Vec::new(),
            sorting: false,
            verbose: false,
            logbuf: LogBuffer::new(),
        }
    }

    /// Exclude any file whose absolute path contains one of these substrings.
    pub fn excluded_directories(mut self, excluded: Vec<String>) -> Self {
        self.excluded_directories = excluded;
        self
    }

    /// Use an already-assembled formatter chain.
    pub fn formatters(mut self, chain: FormatterChain) -> Self {
        self.chain = chain;
        self
    }

    /// Resolve formatter names against the built-in set; unknown names are
    /// dropped with a buffered warning each.
    pub fn formatter_names(mut self, names: &[String]) -> Self {
        self.chain =
            FormatterChain::from_names(names.iter().map(String::as_str), &mut self.logbuf);
        self
    }

    /// Sort signatures lexicographically when finalizing.
    pub fn sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the scan and aggregate matched call sites.
    ///
    /// Parse failures are per-file and non-fatal: each is logged as an error
    /// event and reported in the result, and the file contributes nothing.
    /// Only an unusable root is fatal.
    pub fn retrieve(&mut self) -> Result<RetrieveResult> {
        let root = self
            .root
            .canonicalize()
            .with_context(|| anyhow!("Invalid source root: {}", self.root.display()))?;
        if !root.is_dir() {
            anyhow::bail!("Source root is not a directory: {}", root.display());
        }

        let scan = scan_files(&root, &self.excluded_directories, self.verbose);
        if scan.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan.skipped_count,
                if self.verbose { "" } else { " (use -v for details)" }
            );
        }

        // Parallel read + parse + collect, one task per file. Results come
        // back in input order, so the sequential merge below is
        // deterministic.
        let per_file: Vec<(PathBuf, Result<UsageAccumulator>)> = scan
            .files
            .par_iter()
            .map(|file_path| {
                let outcome = collect_file(file_path, &self.patterns, &self.chain);
                (file_path.clone(), outcome)
            })
            .collect();

        let mut usages = UsageAccumulator::new();
        let mut parse_errors = Vec::new();

        for (file_path, outcome) in per_file {
            match outcome {
                Ok(file_usages) => usages.merge(file_usages),
                Err(error) => {
                    let error = format!("{error:#}");
                    self.logbuf.error(&error);
                    parse_errors.push(ParseErrorIssue {
                        file_path: file_path.to_string_lossy().to_string(),
                        error,
                    });
                }
            }
        }

        Ok(RetrieveResult {
            usages: usages.finalize(self.sorting),
            parse_errors,
            files_scanned: scan.files.len(),
        })
    }

    /// Buffered log messages from the run, keyed by level.
    ///
    /// Drains the buffer unless `preserve` is set.
    pub fn log_messages(&mut self, preserve: bool) -> BTreeMap<Level, Vec<String>> {
        self.logbuf.messages(preserve)
    }
}

fn collect_file(
    file_path: &Path,
    patterns: &CallPatterns,
    chain: &FormatterChain,
) -> Result<UsageAccumulator> {
    let display_path = file_path.to_string_lossy();
    let source = fs::read_to_string(file_path)
        .with_context(|| anyhow!("Failed to read file: {display_path}"))?;
    let parsed = parse_php_source(source, &display_path)?;
    let collector = CallSiteCollector::new(&parsed.source, patterns, chain);
    Ok(collector.collect(parsed.tree.root_node()))
}
