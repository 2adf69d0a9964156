use std::{fs, path::PathBuf};

use anyhow::{Context as _, Result};
use log::Level;

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::cli::args::{OutputFormat, ScanCommand};
use crate::cli::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, load_config};
use crate::core::{CallPatterns, Documentor};
use crate::export::{JsonExport, TextExport, UsageExport};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let verbose = args.common.verbose;

    // CLI --source-root determines where to look for the config file;
    // without it, the config's own sourceRoot decides what to scan.
    let config_dir = args
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&config_dir)?;
    if verbose && !config_result.from_file {
        eprintln!("Note: No {CONFIG_FILE_NAME} found, using default configuration");
    }
    let config = config_result.config;

    if config.patterns.is_empty() {
        anyhow::bail!(
            "No call patterns configured. Add a 'patterns' map to {CONFIG_FILE_NAME} \
             or create one with 'calldoc init'."
        );
    }

    let scan_root = args
        .common
        .source_root
        .unwrap_or_else(|| PathBuf::from(&config.source_root));

    // CLI excludes extend the configured ones rather than replacing them.
    let mut excluded = config.excluded_directories;
    excluded.extend(args.excluded);

    let sorting = args.sort || config.sorting;

    let patterns = CallPatterns::from_map(&config.patterns);
    let mut documentor = Documentor::new(scan_root, patterns)
        .excluded_directories(excluded)
        .formatter_names(&config.formatters)
        .sorting(sorting)
        .verbose(verbose);

    let result = documentor.retrieve()?;

    let exporter: Box<dyn UsageExport> = match args.format {
        OutputFormat::Json => Box::new(JsonExport),
        OutputFormat::Text => Box::new(TextExport),
    };
    let report = exporter.export(&result.usages)?;

    let output_path = match args.output {
        Some(path) => {
            fs::write(&path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    let warnings = documentor
        .log_messages(true)
        .remove(&Level::Warn)
        .unwrap_or_default();

    let exit_status = if result.parse_errors.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    };

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            report: output_path.is_none().then_some(report),
            output_path,
            files_scanned: result.files_scanned,
            signature_count: result.usages.len(),
            occurrence_count: result.usages.occurrence_count(),
            parse_errors: result.parse_errors,
            warnings,
        }),
        exit_status,
    })
}
