//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use crate::cassette::replayer::{decode_result, CassetteReplayer};
use crate::error::PortError;
use crate::ports::shell::{CommandSpec, ShellExecutor, ShellOutput};

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("shell", method).output
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, _command: &CommandSpec) -> Result<ShellOutput, PortError> {
        decode_result(&self.next_output("run"), "shell::run")
    }

    fn stream(&self, _command: &CommandSpec) -> Result<i32, PortError> {
        decode_result(&self.next_output("stream"), "shell::stream")
    }
}
