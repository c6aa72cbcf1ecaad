//! Filesystem port for file I/O operations.

use std::path::{Path, PathBuf};

use crate::error::PortError;

/// Provides filesystem access for reading, writing and walking trees.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Reads a file, replacing invalid UTF-8 sequences with `U+FFFD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_lossy(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates a directory and all missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;

    /// Lists every regular file below `root`, recursively.
    ///
    /// Order is depth-first with siblings sorted by file name, so repeated
    /// walks of an unmodified tree yield the same sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory in the tree cannot be read.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError>;

    /// Like [`FileSystem::walk_files`], but never descends into a directory
    /// below `root` for which `prune` returns `true`.
    ///
    /// Pruned directories are not read, so they cannot fail the walk.
    ///
    /// # Errors
    ///
    /// Returns an error if a visited directory cannot be read.
    fn walk_files_pruned(
        &self,
        root: &Path,
        prune: &dyn Fn(&Path) -> bool,
    ) -> Result<Vec<PathBuf>, PortError>;
}
