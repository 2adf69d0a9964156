//! Source file enumeration.
//!
//! Walks a root directory for `.php` files. Exclusion is literal-substring
//! based: a file is skipped iff one of the excluded strings occurs anywhere
//! in its absolute path. Results are sorted so downstream aggregation order
//! is stable across runs.

use std::path::{Path, PathBuf};

use colored::Colorize;
use walkdir::WalkDir;

/// Result of scanning files.
pub struct ScanResult {
    /// Absolute paths of scannable files, sorted.
    pub files: Vec<PathBuf>,
    /// Paths that could not be accessed.
    pub skipped_count: usize,
}

pub fn scan_files(base_dir: &Path, excluded_directories: &[String], verbose: bool) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(base_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_scannable_file(path) {
            continue;
        }

        // Exclusion tests against the absolute path, falling back to the
        // walked path when canonicalization fails.
        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let path_str = absolute.to_string_lossy();

        if excluded_directories
            .iter()
            .any(|excluded| !excluded.is_empty() && path_str.contains(excluded.as_str()))
        {
            continue;
        }

        files.push(absolute);
    }

    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("php"))
}
