//! Logger setup for the `tasker` binary.
//!
//! Library code logs through the `log` facade; this installs `env_logger` as the
//! backend, writing to stderr so stdout carries only command output.

use log::LevelFilter;

/// Map a `-v` count to a level filter. Zero means warnings and errors only.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. `RUST_LOG`, when set, takes precedence over `verbosity`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
