//! Hidden `gonectr generate` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::{GonectrError, Result};
use crate::ports::CommandSpec;

/// Forward `generate <args...>` to the configured gone generator.
///
/// # Errors
///
/// Returns [`GonectrError::InvalidArgument`] when no generator is configured
/// or it points back at this binary, and [`GonectrError::GenerateFailed`]
/// when the generator cannot start or exits non-zero.
pub fn run(ctx: &ServiceContext, args: &[String]) -> Result<()> {
    let generator = ctx.settings.require_generator()?;
    if is_current_exe(generator) {
        return Err(GonectrError::InvalidArgument(format!(
            "GONECTR_GENERATOR points at gonectr itself ({generator})"
        )));
    }
    let command = CommandSpec::new(generator)
        .arg("generate")
        .args(args.iter().cloned())
        .current_dir(super::working_dir()?);
    tracing::info!(command = %command, "forwarding to gone generator");
    match ctx.shell.stream(&command) {
        Ok(0) => Ok(()),
        Ok(exit_code) => Err(GonectrError::GenerateFailed {
            command: command.to_string(),
            exit_code,
            output: String::new(),
        }),
        Err(err) => Err(GonectrError::GenerateFailed {
            command: command.to_string(),
            exit_code: -1,
            output: err.to_string(),
        }),
    }
}

fn is_current_exe(program: &str) -> bool {
    let current = std::env::current_exe().and_then(std::fs::canonicalize);
    let target = std::fs::canonicalize(Path::new(program));
    matches!((current, target), (Ok(a), Ok(b)) if a == b)
}
