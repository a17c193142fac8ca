use super::error::MergeError;
use crate::fs::FileSystem;
use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A log file selected for merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    /// Last path component; the only part parameters are extracted from.
    pub name: String,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { path, name }
    }
}

/// Resolves the command-line paths into a sorted list of log files.
pub struct LogCollector<'a, F: FileSystem> {
    fs: &'a F,
    extension: String,
}

impl<'a, F: FileSystem> LogCollector<'a, F> {
    pub fn new(fs: &'a F, extension: impl Into<String>) -> Self {
        Self {
            fs,
            extension: extension.into(),
        }
    }

    /// Files are taken as given; directories contribute their files with the configured
    /// extension. The result is sorted by file name, then path, without duplicates.
    pub fn collect(&self, paths: &[PathBuf]) -> Result<Vec<LogFile>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for path in paths {
            for file in self.expand(path)? {
                if seen.insert(file.path.clone()) {
                    files.push(file);
                }
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        debug!(count = files.len(), "Collected log files");
        Ok(files)
    }

    fn expand(&self, path: &Path) -> Result<Vec<LogFile>> {
        if !self.fs.exists(path) {
            return Err(MergeError::PathNotFound(path.to_path_buf()).into());
        }

        if !self.fs.is_dir(path) {
            return Ok(vec![LogFile::new(path)]);
        }

        let files: Vec<LogFile> = self
            .fs
            .list_files(path)?
            .into_iter()
            .filter(|e| e.has_extension(&self.extension))
            .map(|e| LogFile {
                path: e.path,
                name: e.name,
            })
            .collect();
        debug!(dir = ?path, count = files.len(), "Listed directory");
        Ok(files)
    }
}
