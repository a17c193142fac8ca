//! Command handlers
//!
//! Each `handle_*` function returns the process exit code: 0 on success, 1 when the
//! command ran but failed, 2 for configuration errors. The `run_*` functions hold the
//! actual logic and are generic over the file system so they can be tested in memory.

use super::commands::{CheckArgs, MergeArgs, ParamsArgs, TemplateArgs};
use super::output::{FileParameters, OutputFormatter, ParamsReport};
use crate::config::{ConfigError, ExplogConfig};
use crate::fs::{FileSystem, RealFileSystem};
use crate::merge::{
    CheckReport, LogCollector, LogFile, LogMerger, MergeError, MergeOptions, MergeSummary,
    RepetitionChecker, TemplateSource,
};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

pub fn handle_merge(args: &MergeArgs, base: &ExplogConfig) -> i32 {
    let config = match resolve_config(base, &args.template, args.separator.as_deref(), args.header) {
        Ok(c) => c,
        Err(e) => return config_failure(e),
    };

    let fs = RealFileSystem::new();
    let result = match &args.output {
        Some(path) => File::create(path)
            .with_context(|| format!("Failed to create output file {:?}", path))
            .and_then(|file| run_merge(args, &config, &fs, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run_merge(args, &config, &fs, &mut out)
        }
    };

    match result {
        Ok(summary) => {
            info!(
                files = summary.files,
                lines = summary.lines,
                skipped = summary.skipped,
                "Merge complete"
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Merge failed: {:#}", e);
            EXIT_FAILURE
        }
    }
}

pub fn handle_params(args: &ParamsArgs, base: &ExplogConfig) -> i32 {
    let config = match resolve_config(base, &args.template, None, false) {
        Ok(c) => c,
        Err(e) => return config_failure(e),
    };

    let report = match run_params(args, &config, &RealFileSystem::new()) {
        Ok(r) => r,
        Err(e) => {
            error!("Parameter extraction failed: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_params(&report) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return EXIT_FAILURE;
        }
    }

    if report.failures() > 0 {
        warn!(failures = report.failures(), "Some files did not fit the template");
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}

pub fn handle_check(args: &CheckArgs, base: &ExplogConfig) -> i32 {
    let config = match resolve_config(base, &args.template, None, false) {
        Ok(c) => c,
        Err(e) => return config_failure(e),
    };

    let report = match run_check(args, &config, &RealFileSystem::new()) {
        Ok(r) => r,
        Err(e) => {
            error!("Structural check failed: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_check(&report) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return EXIT_FAILURE;
        }
    }

    if report.is_ok() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Applies command-line overrides on top of the environment configuration.
pub fn resolve_config(
    base: &ExplogConfig,
    template: &TemplateArgs,
    separator: Option<&str>,
    header: bool,
) -> Result<ExplogConfig, ConfigError> {
    let mut config = base.clone();

    if let Some(ext) = &template.extension {
        config.extension = ext.clone();
    }
    if let Some(sep) = separator {
        config.separator = ExplogConfig::parse_separator(sep)?;
    }
    if header {
        config.header = true;
    }

    config.validate()?;
    debug!("{}", config);
    Ok(config)
}

pub fn run_merge<F: FileSystem, W: Write>(
    args: &MergeArgs,
    config: &ExplogConfig,
    fs: &F,
    out: &mut W,
) -> Result<MergeSummary> {
    let files = collect(&args.template, config, fs)?;
    let extractor = template_source(&args.template).build(&files)?;

    let options = MergeOptions {
        include_repetition: !args.no_repetitions,
        skip_invalid: args.skip_invalid,
        header: config.header,
        separator: config.separator.clone(),
        max_file_size_bytes: config.max_file_size_bytes,
    };
    let merger = LogMerger::new(fs, &extractor, options);

    let (logs, skipped) = merger.extract_all(files)?;
    let mut summary = merger.write_merged(&logs, out)?;
    summary.skipped = skipped;
    Ok(summary)
}

pub fn run_params<F: FileSystem>(
    args: &ParamsArgs,
    config: &ExplogConfig,
    fs: &F,
) -> Result<ParamsReport> {
    let files = collect(&args.template, config, fs)?;
    let extractor = template_source(&args.template).build(&files)?;
    let include_repetition = !args.no_repetitions;

    let entries = files
        .into_iter()
        .map(
            |file| match extractor.parameters(&file.name, include_repetition) {
                Ok(mapping) => FileParameters::extracted(file.name, mapping),
                Err(e) => FileParameters::failed(file.name, e.to_string()),
            },
        )
        .collect();

    Ok(ParamsReport {
        template: extractor.template().clone(),
        files: entries,
    })
}

pub fn run_check<F: FileSystem>(
    args: &CheckArgs,
    config: &ExplogConfig,
    fs: &F,
) -> Result<CheckReport> {
    let files = collect(&args.template, config, fs)?;
    let source = template_source(&args.template);
    let extractor = source.build(&files)?;

    let checker = RepetitionChecker::new(&extractor, &source.describe(&files))?;
    Ok(checker.check(&files))
}

fn collect<F: FileSystem>(
    template: &TemplateArgs,
    config: &ExplogConfig,
    fs: &F,
) -> Result<Vec<LogFile>> {
    let paths = if template.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        template.paths.clone()
    };

    let files = LogCollector::new(fs, config.extension.as_str()).collect(&paths)?;
    if files.is_empty() {
        return Err(MergeError::NoInputFiles.into());
    }
    Ok(files)
}

fn template_source(template: &TemplateArgs) -> TemplateSource {
    match (&template.prototype, &template.params) {
        (Some(prototype), _) => TemplateSource::Prototype(prototype.clone()),
        (None, Some(names)) => TemplateSource::Names(names.clone()),
        (None, None) => TemplateSource::FirstFile,
    }
}

fn config_failure(e: ConfigError) -> i32 {
    error!("{}", e);
    EXIT_CONFIG_ERROR
}
