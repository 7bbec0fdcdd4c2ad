// ============================================================================
// novel-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern Dispatch for Console and Build Log
//
// Two chains:
// - console (stderr): `Warn` unless NOVEL_BUILDER_LOG names another level
// - build log file (append): `Debug`, timestamped, only for commands that
//   build something
//
// External tool output is written to the same build log by `BuildLog`; these
// records interleave with it.
//
// AI-ASSISTANT-INFO: fern logger initialization for the CLI

// ---- External crate imports ----
use log::LevelFilter;

// ---- Standard library imports ----
use std::path::Path;
use std::str::FromStr;

/// Environment variable overriding the console log level.
pub const LOG_LEVEL_ENV: &str = "NOVEL_BUILDER_LOG";

/// Parses a level name, falling back to `Warn` for absent or unknown values.
#[must_use]
pub fn console_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Returns the current local timestamp as used in log records.
#[must_use]
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Installs the global logger.
///
/// `log_file` is opened in append mode; its parent directory must exist.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let console = console_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());

    let console_chain = fern::Dispatch::new()
        .level(console)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message));
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .level(LevelFilter::Trace)
        .chain(console_chain);

    if let Some(path) = log_file {
        let file_chain = fern::Dispatch::new()
            .level(LevelFilter::Debug)
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] {}",
                    get_timestamp(),
                    record.level(),
                    message
                ));
            })
            .chain(fern::log_file(path)?);
        dispatch = dispatch.chain(file_chain);
    }

    dispatch.apply()?;
    Ok(())
}
