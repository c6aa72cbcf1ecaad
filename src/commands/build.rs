//! `gonectr build` command.

use crate::context::ServiceContext;
use crate::error::Result;
use crate::orchestrate::{GoSubcommand, Orchestrator};

/// Execute the `build` command from the current working directory.
///
/// # Errors
///
/// Returns an error if generation fails or `go build` exits non-zero.
pub fn run(ctx: &ServiceContext, args: &[String]) -> Result<()> {
    let cwd = super::working_dir()?;
    Orchestrator::new(ctx).execute(GoSubcommand::Build, args, &cwd)
}
