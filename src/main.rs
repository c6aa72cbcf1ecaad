//! Binary entrypoint for the `gonectr` CLI.

use std::process::ExitCode;

use gonectr::GonectrError;

fn main() -> ExitCode {
    // Recording is handled in commands::dispatch via GONECTR_RECORD=<dir>.
    match gonectr::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(GonectrError::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("gonectr: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
