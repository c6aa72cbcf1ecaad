//! Core library entry for the `gonectr` CLI.
//!
//! `gonectr build` and `gonectr run` regenerate framework wiring code for the
//! enclosing Go module before handing off to the host toolchain;
//! `gonectr mock` turns mockgen output into mocks the container can inject.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod directive;
pub mod error;
pub mod logging;
pub mod mock;
pub mod module;
pub mod orchestrate;
pub mod ports;

#[cfg(test)]
mod test_support;

use clap::Parser;

pub use error::{GonectrError, Result};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`GonectrError::Cli`] when argument parsing fails, otherwise the
/// error of the dispatched command.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    let settings = config::Settings::from_env();
    logging::init(&settings.log_level, cli.verbose);
    commands::dispatch(&cli.command, settings)
}
