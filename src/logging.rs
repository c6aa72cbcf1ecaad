//! Tracing subscriber setup.

use std::io::IsTerminal;

use tracing::Level;

/// Maps a level name to a tracing level. Unknown names fall back to `INFO`.
#[must_use]
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global fmt subscriber writing to stderr.
///
/// Colors are only emitted when stderr is a terminal.
/// `verbose` forces `DEBUG` regardless of `level`. Calling this twice is
/// harmless; the second call keeps the first subscriber.
pub fn init(level: &str, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { parse_level(level) };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
