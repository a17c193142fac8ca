use anyhow::Result;
use std::path::{Path, PathBuf};

/// A regular file found while listing a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
}

impl DirEntry {
    pub fn has_extension(&self, extension: &str) -> bool {
        extension.is_empty() || self.name.ends_with(extension)
    }
}

/// The file operations the driver needs, abstracted for tests.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Size of a regular file in bytes.
    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Raw file contents. Log lines are passed through undecoded.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Regular files directly inside `path`. Subdirectories are not returned.
    fn list_files(&self, path: &Path) -> Result<Vec<DirEntry>>;
}
