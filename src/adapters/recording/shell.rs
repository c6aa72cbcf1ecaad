//! Recording adapter for the `ShellExecutor` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::PortError;
use crate::ports::{CommandSpec, ShellExecutor, ShellOutput};

/// Wraps another executor and appends every command and its outcome to a
/// `shell` cassette. Spawn failures are recorded as `{"err": ...}`.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Wraps `inner`, writing interactions into `recorder`.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(&self, command: &CommandSpec) -> Result<ShellOutput, PortError> {
        let result = self.inner.run(command);
        record_result(&self.recorder, "shell", "run", command, &result);
        result
    }

    fn stream(&self, command: &CommandSpec) -> Result<i32, PortError> {
        let result = self.inner.stream(command);
        record_result(&self.recorder, "shell", "stream", command, &result);
        result
    }
}
