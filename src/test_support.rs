//! Shared fakes for unit tests.

use std::sync::{Arc, Mutex};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::PortError;
use crate::ports::{CommandSpec, ShellExecutor, ShellOutput};

type Responder = dyn Fn(&CommandSpec) -> Result<ShellOutput, PortError> + Send + Sync;

/// Shell fake that logs every command and answers from a closure.
///
/// `stream` calls reuse the responder and return its exit code.
pub struct ScriptedShell {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    responder: Box<Responder>,
}

impl ScriptedShell {
    pub fn new<F>(responder: F) -> (Self, Arc<Mutex<Vec<CommandSpec>>>)
    where
        F: Fn(&CommandSpec) -> Result<ShellOutput, PortError> + Send + Sync + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (Self { calls: Arc::clone(&calls), responder: Box::new(responder) }, calls)
    }

    fn answer(&self, command: &CommandSpec) -> Result<ShellOutput, PortError> {
        self.calls.lock().unwrap().push(command.clone());
        (self.responder)(command)
    }
}

impl ShellExecutor for ScriptedShell {
    fn run(&self, command: &CommandSpec) -> Result<ShellOutput, PortError> {
        self.answer(command)
    }

    fn stream(&self, command: &CommandSpec) -> Result<i32, PortError> {
        self.answer(command).map(|out| out.exit_code)
    }
}

pub fn ok(stdout: &str) -> ShellOutput {
    ShellOutput { exit_code: 0, stdout: stdout.to_string(), stderr: String::new() }
}

pub fn failed(exit_code: i32, stderr: &str) -> ShellOutput {
    ShellOutput { exit_code, stdout: String::new(), stderr: stderr.to_string() }
}

/// Settings with fixed program names so assertions do not depend on the test binary path.
pub fn settings() -> Settings {
    Settings {
        go: "go".into(),
        mockgen: "mockgen".into(),
        generator: Some("gonectr".into()),
        generator_name: "gonectr".into(),
        record_dir: None,
        log_level: "info".into(),
    }
}

/// Real filesystem plus a scripted shell.
pub fn context_with<F>(responder: F) -> (ServiceContext, Arc<Mutex<Vec<CommandSpec>>>)
where
    F: Fn(&CommandSpec) -> Result<ShellOutput, PortError> + Send + Sync + 'static,
{
    let (shell, calls) = ScriptedShell::new(responder);
    (ServiceContext::new(Box::new(LiveFileSystem), Box::new(shell), settings()), calls)
}
