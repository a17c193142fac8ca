use super::collector::LogFile;
use super::error::MergeError;
use crate::extraction::{ParameterExtractor, ParameterMapping, REPETITION};
use crate::fs::FileSystem;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info, warn};

const MISSING_VALUE: &str = "NA";

/// Where the parameter template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A prototype filename given on the command line.
    Prototype(String),
    /// An explicit list of parameter names.
    Names(Vec<String>),
    /// The name of the first collected file.
    FirstFile,
}

impl TemplateSource {
    pub fn build(&self, files: &[LogFile]) -> Result<ParameterExtractor> {
        let extractor = match self {
            TemplateSource::Prototype(prototype) => ParameterExtractor::new(prototype),
            TemplateSource::Names(names) => ParameterExtractor::from_names(names)?,
            TemplateSource::FirstFile => {
                let first = files.first().ok_or(MergeError::NoInputFiles)?;
                ParameterExtractor::new(&first.name)
            }
        };

        info!(
            parameters = ?extractor.template().names(),
            repetition = extractor.template().has_repetition(),
            "Parameter template ready"
        );
        Ok(extractor)
    }

    /// Prototype text for diagnostics.
    pub fn describe(&self, files: &[LogFile]) -> String {
        match self {
            TemplateSource::Prototype(prototype) => prototype.clone(),
            TemplateSource::Names(names) => names.join(","),
            TemplateSource::FirstFile => files.first().map(|f| f.name.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub include_repetition: bool,
    pub skip_invalid: bool,
    pub header: bool,
    pub separator: String,
    pub max_file_size_bytes: u64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            include_repetition: true,
            skip_invalid: false,
            header: false,
            separator: " ".to_string(),
            max_file_size_bytes: u64::MAX,
        }
    }
}

/// A log file together with the parameters extracted from its name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLog {
    pub file: LogFile,
    pub mapping: ParameterMapping,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: usize,
    pub lines: usize,
    pub skipped: usize,
}

pub struct LogMerger<'a, F: FileSystem> {
    fs: &'a F,
    extractor: &'a ParameterExtractor,
    options: MergeOptions,
}

impl<'a, F: FileSystem> LogMerger<'a, F> {
    pub fn new(fs: &'a F, extractor: &'a ParameterExtractor, options: MergeOptions) -> Self {
        Self {
            fs,
            extractor,
            options,
        }
    }

    /// Extracts every file's parameters and orders the files by their values.
    ///
    /// Returns the ordered logs and the number of files skipped as invalid.
    pub fn extract_all(&self, files: Vec<LogFile>) -> Result<(Vec<ExtractedLog>, usize)> {
        let mut logs = Vec::with_capacity(files.len());
        let mut skipped = 0;

        for file in files {
            match self
                .extractor
                .parameters(&file.name, self.options.include_repetition)
            {
                Ok(mapping) => {
                    let unknown = self.extractor.unknown_names(&file.name);
                    if !unknown.is_empty() {
                        warn!(file = %file.name, unknown = ?unknown, "Ignoring tokens not in template");
                    }
                    logs.push(ExtractedLog { file, mapping })
                }
                Err(source) if self.options.skip_invalid => {
                    warn!(file = %file.name, error = %source, "Skipping file");
                    skipped += 1;
                }
                Err(source) => {
                    return Err(MergeError::Extraction {
                        path: file.path,
                        source,
                    }
                    .into())
                }
            }
        }

        logs.sort_by(|a, b| {
            a.mapping
                .cmp_values(&b.mapping)
                .then_with(|| a.file.name.cmp(&b.file.name))
        });
        Ok((logs, skipped))
    }

    /// Column names of the annotation prefix.
    ///
    /// `R` is a column when repetitions are included and either the template or any
    /// of the logs carries one.
    pub fn columns(&self, logs: &[ExtractedLog]) -> Vec<String> {
        let template = self.extractor.template();
        let mut columns = template.names().to_vec();
        let has_repetition =
            template.has_repetition() || logs.iter().any(|l| l.mapping.contains(REPETITION));
        if has_repetition && self.options.include_repetition {
            columns.push(REPETITION.to_string());
        }
        columns
    }

    /// Writes every line of every log, prefixed with the file's parameter values.
    ///
    /// Line contents are copied as raw bytes, so logs need not be valid UTF-8.
    pub fn write_merged<W: Write>(&self, logs: &[ExtractedLog], out: &mut W) -> Result<MergeSummary> {
        let columns = self.columns(logs);
        let sep = &self.options.separator;
        let mut summary = MergeSummary::default();

        if self.options.header {
            writeln!(out, "# {}", columns.join(sep)).context("Failed to write header")?;
        }

        for log in logs {
            let content = self.read_log(&log.file)?;
            let mut prefix = format_prefix(&log.mapping, &columns, sep);
            if !prefix.is_empty() {
                prefix.push_str(sep);
            }

            let mut lines = 0;
            for line in split_lines(&content) {
                out.write_all(prefix.as_bytes())
                    .and_then(|_| out.write_all(line))
                    .and_then(|_| out.write_all(b"\n"))
                    .context("Failed to write merged output")?;
                lines += 1;
            }

            debug!(file = %log.file.name, lines, "Merged file");
            summary.files += 1;
            summary.lines += lines;
        }

        out.flush().context("Failed to flush merged output")?;
        Ok(summary)
    }

    fn read_log(&self, file: &LogFile) -> Result<Vec<u8>> {
        let size = self.fs.file_size(&file.path)?;
        if size > self.options.max_file_size_bytes {
            return Err(MergeError::FileTooLarge {
                path: file.path.clone(),
                size,
                limit: self.options.max_file_size_bytes,
            }
            .into());
        }
        self.fs.read(&file.path)
    }
}

/// Splits on `\n`, dropping a trailing `\r` from each line and the empty piece after
/// a final newline.
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = (!content.is_empty()).then(|| content.strip_suffix(b"\n").unwrap_or(content));
    body.into_iter()
        .flat_map(|body| body.split(|&b| b == b'\n'))
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Renders a mapping's values in column order; absent values print as `NA`.
pub fn format_prefix(mapping: &ParameterMapping, columns: &[String], separator: &str) -> String {
    columns
        .iter()
        .map(|name| match mapping.get(name) {
            Some(value) => value.to_string(),
            None => MISSING_VALUE.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}
