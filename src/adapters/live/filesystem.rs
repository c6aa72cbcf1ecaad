//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read_lossy(&self, path: &Path) -> Result<String, PortError> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError> {
        collect_files(WalkDir::new(root).sort_by_file_name())
    }

    fn walk_files_pruned(
        &self,
        root: &Path,
        prune: &dyn Fn(&Path) -> bool,
    ) -> Result<Vec<PathBuf>, PortError> {
        let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !prune(entry.path())
        });
        collect_files(walker)
    }
}

fn collect_files<I>(entries: I) -> Result<Vec<PathBuf>, PortError>
where
    I: IntoIterator<Item = walkdir::Result<DirEntry>>,
{
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
