use super::{DirEntry, FileSystem};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        let meta = fs::metadata(path).context(format!("Failed to get metadata for {:?}", path))?;
        Ok(meta.len())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).context(format!("Failed to read file {:?}", path))
    }

    fn list_files(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            result.push(DirEntry { path, name });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_run_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("nested")).unwrap();
        fs::write(base.join("PSI_1_R_1.log"), "a\nb\n").unwrap();
        fs::write(base.join("PSI_2_R_1.log"), "c\n").unwrap();

        dir
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp = create_run_dir();
        let fs = RealFileSystem::new();

        let mut names: Vec<String> = fs
            .list_files(temp.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["PSI_1_R_1.log", "PSI_2_R_1.log"]);
    }

    #[test]
    fn test_read_and_size() {
        let temp = create_run_dir();
        let fs = RealFileSystem::new();
        let path = temp.path().join("PSI_1_R_1.log");

        assert_eq!(fs.read(&path).unwrap(), b"a\nb\n");
        assert_eq!(fs.file_size(&path).unwrap(), 4);
        assert!(fs.exists(&path));
        assert!(fs.is_dir(&temp.path().join("nested")));
    }

    #[test]
    fn test_read_keeps_invalid_utf8() {
        let temp = create_run_dir();
        let fs = RealFileSystem::new();
        let path = temp.path().join("PSI_3_R_1.log");
        fs::write(&path, b"ok\n\xff\xfe bad\n").unwrap();

        assert_eq!(fs.read(&path).unwrap(), b"ok\n\xff\xfe bad\n");
    }

    #[test]
    fn test_missing_file_has_context() {
        let temp = create_run_dir();
        let fs = RealFileSystem::new();

        let err = fs.read(&temp.path().join("nope.log")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
