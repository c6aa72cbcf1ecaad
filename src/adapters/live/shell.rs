//! Live shell executor using `std::process::Command`.

use std::process::Command;

use crate::error::PortError;
use crate::ports::shell::{CommandSpec, ShellExecutor, ShellOutput};

/// Live shell executor that spawns real child processes.
pub struct LiveShellExecutor;

fn build(spec: &CommandSpec) -> Command {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args);
    if let Some(dir) = &spec.cwd {
        command.current_dir(dir);
    }
    command
}

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, command: &CommandSpec) -> Result<ShellOutput, PortError> {
        let output = build(command).output()?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream(&self, command: &CommandSpec) -> Result<i32, PortError> {
        let status = build(command).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}
