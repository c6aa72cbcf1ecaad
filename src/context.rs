//! Service context bundling the port trait objects and settings.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::{RecordingFileSystem, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingShellExecutor};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for file I/O and tree walks.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor for running child processes.
    pub shell: Box<dyn ShellExecutor>,
    /// Tool settings.
    pub settings: Settings,
}

impl ServiceContext {
    /// Creates a context from explicit port implementations.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, shell: Box<dyn ShellExecutor>, settings: Settings) -> Self {
        Self { fs, shell, settings }
    }

    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live(settings: Settings) -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveShellExecutor), settings)
    }

    /// Creates a live context whose interactions are captured into `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(
        dir: &Path,
        settings: Settings,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let ctx = Self::new(
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                session.shell.clone(),
            )),
            settings,
        );
        Ok((ctx, session))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// # Errors
    ///
    /// Returns an error if either cassette cannot be read or parsed.
    pub fn replaying(
        fs_cassette: &Path,
        shell_cassette: &Path,
        settings: Settings,
    ) -> Result<Self, String> {
        let fs = CassetteReplayer::new(&Cassette::load(fs_cassette)?);
        let shell = CassetteReplayer::new(&Cassette::load(shell_cassette)?);
        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(fs)),
            Box::new(ReplayingShellExecutor::new(shell)),
            settings,
        ))
    }

    /// Creates a replaying context from a directory written by a recording session.
    ///
    /// # Errors
    ///
    /// Returns an error if `fs.cassette.yaml` or `shell.cassette.yaml` is
    /// missing or invalid.
    pub fn replaying_dir(dir: &Path, settings: Settings) -> Result<Self, String> {
        Self::replaying(&dir.join("fs.cassette.yaml"), &dir.join("shell.cassette.yaml"), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::ports::CommandSpec;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_both_ports() {
        let dir = tempfile::tempdir().unwrap();

        let mut fs = CassetteRecorder::new(dir.path().join("fs.cassette.yaml"), "fs");
        fs.record("fs", "exists", json!({"path": "/m/go.mod"}), json!(true));
        fs.finish().unwrap();

        let mut shell = CassetteRecorder::new(dir.path().join("shell.cassette.yaml"), "shell");
        shell.record("shell", "stream", json!({"program": "go", "args": []}), json!({"ok": 0}));
        shell.finish().unwrap();

        let ctx = ServiceContext::replaying_dir(dir.path(), Settings::default()).unwrap();
        assert!(ctx.fs.exists(Path::new("/m/go.mod")));
        assert_eq!(ctx.shell.stream(&CommandSpec::new("go")).unwrap(), 0);
    }

    #[test]
    fn replaying_dir_without_cassettes_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceContext::replaying_dir(dir.path(), Settings::default())
            .err()
            .expect("missing cassettes must fail");
        assert!(err.contains("fs.cassette.yaml"));
    }
}
