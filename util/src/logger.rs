//! Generic logger utility functions
//!
//! Log lines are stamped with both the session elapsed time and the current
//! control cycle, which the executable advances with [`set_cycle`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// The cycle number shown in log lines.
static CURRENT_CYCLE: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Records are always written to the session log file. When `echo_stdout` is
/// set they are also printed to stdout, which is disabled for fast
/// (non-realtime) runs where per-cycle output would swamp the terminal.
///
/// # Notes
///
/// - `min_level` must be greater than `log::Level::Info`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    echo_stdout: bool,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    let log_file = match fern::log_file(session.log_file_path.clone()) {
        Ok(f) => f,
        Err(e) => return Err(LoggerInitError::LogFileInitError(e))
    };

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {

            // If debug or trace include the target, otherwise don't include it
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} c{:07} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    get_cycle(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "[{:10.6} c{:07} {}] {}",
                    session::get_elapsed_seconds(),
                    get_cycle(),
                    level_to_str(record.level()),
                    message
                ))
            }

        })
        .level(min_level)
        .chain(log_file);

    if echo_stdout {
        dispatch = dispatch.chain(std::io::stdout());
    }

    if let Err(e) = dispatch.apply() {
        return Err(LoggerInitError::FernInitError(e))
    }

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", min_level);
    info!("    Log file path: {:?}", session.log_file_path);
    info!("    Echo to stdout: {}", echo_stdout);

    Ok(())
}

/// Set the cycle number shown in subsequent log lines.
pub fn set_cycle(cycle: u64) {
    CURRENT_CYCLE.store(cycle, Ordering::Relaxed);
}

/// Get the cycle number currently shown in log lines.
pub fn get_cycle() -> u64 {
    CURRENT_CYCLE.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}
