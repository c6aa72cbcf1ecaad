//! Command dispatch and handlers.

pub mod build;
pub mod generate;
pub mod mock;
pub mod run;

use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{GonectrError, Result};

/// Dispatch a parsed command to its handler.
///
/// When `GONECTR_RECORD` names a directory, all port interactions are
/// recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns the handler's error, or [`GonectrError::Recording`] if the
/// recording session cannot be started or saved.
pub fn dispatch(command: &Command, settings: Settings) -> Result<()> {
    let (ctx, session) = match settings.record_dir.clone() {
        Some(dir) => {
            let (ctx, session) =
                ServiceContext::recording_at(&dir, settings).map_err(GonectrError::Recording)?;
            (ctx, Some(session))
        }
        None => (ServiceContext::live(settings), None),
    };

    let result = dispatch_with_context(command, &ctx);

    if let Some(session) = session {
        // Adapters hold recorder references until the context is gone.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<()> {
    match command {
        Command::Build { args } => build::run(ctx, args),
        Command::Run { args } => run::run(ctx, args),
        Command::Generate { args } => generate::run(ctx, args),
        Command::Mock { scan_dir, package, destination } => {
            mock::run(ctx, scan_dir.as_deref(), package.as_deref(), destination.as_deref())
        }
    }
}

/// Working directory of the process, captured once per command.
pub(crate) fn working_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| GonectrError::Io { path: PathBuf::from("."), source: Box::new(e) })
}

fn finish_recording(session: RecordingSession) -> Result<()> {
    let output_dir = session.finish().map_err(GonectrError::Recording)?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
