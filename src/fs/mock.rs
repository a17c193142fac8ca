use super::{DirEntry, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory file system. Paths are taken as given; directories are implied by the
/// parents of added files.
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.add_bytes(path, content.as_bytes());
    }

    pub fn add_bytes(&self, path: impl AsRef<Path>, content: &[u8]) {
        self.files
            .write()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), content.to_vec());
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .keys()
            .any(|p| p.starts_with(dir) && p != dir)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.has_children(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        !self.files.read().unwrap().contains_key(path) && self.has_children(path)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        self.read(path).map(|c| c.len() as u64)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }

    fn list_files(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !self.is_dir(path) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        let files = self.files.read().unwrap();
        let entries = files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .map(|p| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
            })
            .collect();

        Ok(entries)
    }
}
