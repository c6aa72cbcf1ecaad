//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cassette::replayer::{decode_result, CassetteReplayer};
use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("fs", method).output
    }

    fn next_bool(&self, method: &str) -> bool {
        let output = self.next_output(method);
        output.as_bool().unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        decode_result(&self.next_output("read_to_string"), "fs::read_to_string")
    }

    fn read_lossy(&self, _path: &Path) -> Result<String, PortError> {
        decode_result(&self.next_output("read_lossy"), "fs::read_lossy")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        decode_result(&self.next_output("write"), "fs::write")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.next_bool("exists")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.next_bool("is_dir")
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), PortError> {
        decode_result(&self.next_output("create_dir_all"), "fs::create_dir_all")
    }

    fn walk_files(&self, _root: &Path) -> Result<Vec<PathBuf>, PortError> {
        decode_result(&self.next_output("walk_files"), "fs::walk_files")
    }

    /// The recorded listing already reflects the pruning done when recording.
    fn walk_files_pruned(
        &self,
        _root: &Path,
        _prune: &dyn Fn(&Path) -> bool,
    ) -> Result<Vec<PathBuf>, PortError> {
        decode_result(&self.next_output("walk_files_pruned"), "fs::walk_files_pruned")
    }
}
