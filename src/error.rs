//! Error types for `gonectr` operations.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GonectrError>;

/// Errors surfaced by the build, run and mock commands.
///
/// Every variant aborts the current top-level command; nothing is retried.
#[derive(Debug, Error)]
pub enum GonectrError {
    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No `go.mod` was found on any ancestor of the search start.
    #[error("no go.mod found in {} or any parent directory", start.display())]
    ModuleNotFound {
        /// Directory the upward search started from.
        start: PathBuf,
    },

    /// A file or directory could not be read while scanning.
    #[error("failed to scan {}: {source}", path.display())]
    ScanIo {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },

    /// The generate step (native or self-invoked) failed.
    #[error("generate failed: `{command}` exited with {exit_code}\n{output}")]
    GenerateFailed {
        /// Command line that was executed.
        command: String,
        /// Exit code of the child, `-1` when it could not be spawned.
        exit_code: i32,
        /// Captured output or spawn error text.
        output: String,
    },

    /// The final `go build` exited non-zero.
    #[error("build failed with exit code {exit_code}")]
    BuildFailed {
        /// Exit code of `go build`.
        exit_code: i32,
    },

    /// The final `go run` exited non-zero.
    #[error("run failed with exit code {exit_code}")]
    RunFailed {
        /// Exit code of `go run`.
        exit_code: i32,
    },

    /// The mock generator could not be run or exited non-zero.
    #[error("`{command}` failed with exit code {exit_code}\n{output}")]
    Subprocess {
        /// Command line that was executed.
        command: String,
        /// Exit code of the child, `-1` when it could not be spawned.
        exit_code: i32,
        /// Captured output or spawn error text.
        output: String,
    },

    /// Writing generated output failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },

    /// A recording session could not be started or its cassettes written.
    #[error("recording failed: {0}")]
    Recording(String),

    /// Command-line parsing failed (includes `--help` and `--version`).
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

impl GonectrError {
    /// Exit code the process should terminate with for this error.
    ///
    /// Build and run failures mirror the child's own exit status.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BuildFailed { exit_code } | Self::RunFailed { exit_code } if *exit_code > 0 => {
                *exit_code
            }
            Self::Cli(err) => err.exit_code(),
            _ => 1,
        }
    }
}
