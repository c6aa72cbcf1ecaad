//! Recording adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::PortError;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a Path,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a Path,
    contents: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, "fs", "read_to_string", &PathInput { path }, &result);
        result
    }

    fn read_lossy(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_lossy(path);
        record_result(&self.recorder, "fs", "read_lossy", &PathInput { path }, &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        record_result(&self.recorder, "fs", "write", &WriteInput { path, contents }, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        record_interaction(&self.recorder, "fs", "exists", &PathInput { path }, &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, "fs", "is_dir", &PathInput { path }, &result);
        result
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.create_dir_all(path);
        record_result(&self.recorder, "fs", "create_dir_all", &PathInput { path }, &result);
        result
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError> {
        let result = self.inner.walk_files(root);
        record_result(&self.recorder, "fs", "walk_files", &PathInput { path: root }, &result);
        result
    }

    fn walk_files_pruned(
        &self,
        root: &Path,
        prune: &dyn Fn(&Path) -> bool,
    ) -> Result<Vec<PathBuf>, PortError> {
        let result = self.inner.walk_files_pruned(root, prune);
        let input = PathInput { path: root };
        record_result(&self.recorder, "fs", "walk_files_pruned", &input, &result);
        result
    }
}
