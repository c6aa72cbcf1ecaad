//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `gonectr`.
#[derive(Debug, Parser)]
#[command(
    name = "gonectr",
    version,
    about = "Regenerate framework wiring before go build/run, and generate mocks"
)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate code, then run `go build` with the given arguments.
    Build {
        /// Arguments passed through to `go build`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Generate code, then run `go run` with the given arguments.
    Run {
        /// Arguments passed through to `go run`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Forward `generate -s=... -m=...` to the configured gone generator.
    ///
    /// Lets `//go:generate gonectr generate ...` directives resolve to this binary.
    #[command(hide = true)]
    Generate {
        /// Arguments passed through to `<generator> generate`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Generate injectable mocks for every interface in a directory.
    Mock {
        /// Directory whose Go files are passed to mockgen.
        #[arg(short = 's', long = "scan-dir")]
        scan_dir: Option<PathBuf>,
        /// Package name of the generated mocks.
        #[arg(short = 'p', long = "package")]
        package: Option<String>,
        /// Output directory (defaults to the package name).
        #[arg(short = 'd', long)]
        destination: Option<PathBuf>,
    },
}
