#![deny(missing_docs)]
//! Shared logging utilities for the insights workspace.
//!
//! This crate provides the `insight_*` logging macros used across the
//! codebase, the logger initialisation used by the binary, and a minimal
//! test initializer for the global logger.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! insight_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! insight_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! insight_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! insight_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! insight_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Append to a file. Used while the terminal UI owns the screen.
    File(PathBuf),
    /// Write every record to stderr, keeping stdout free for program output.
    Stderr,
    /// Write to both a file and stderr.
    Both(PathBuf),
}

/// Initialize the global logger.
///
/// Returns the io error when a log file cannot be opened. A logger that was
/// already installed (by a test, for example) is left in place.
pub fn initialize(destination: &LogDestination, level: LevelFilter) -> io::Result<()> {
    let loggers = build_loggers(destination, level)?;
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

fn build_loggers(
    destination: &LogDestination,
    level: LevelFilter,
) -> io::Result<Vec<Box<dyn SharedLogger>>> {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    match destination {
        LogDestination::File(path) => {
            loggers.push(create_file_logger(path, level, config)?);
        }
        LogDestination::Stderr => {
            loggers.push(create_stderr_logger(level, config));
        }
        LogDestination::Both(path) => {
            loggers.push(create_stderr_logger(level, config.clone()));
            loggers.push(create_file_logger(path, level, config)?);
        }
    }
    Ok(loggers)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build()
}

fn create_stderr_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> io::Result<Box<WriteLogger<File>>> {
    let file = open_log_file(path)?;
    Ok(WriteLogger::new(level, config, file))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_created_with_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("insights.log");

        let file = open_log_file(&path).unwrap();
        drop(file);

        assert!(path.exists());
    }

    #[test]
    fn both_destination_writes_to_stderr_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("insights.log");

        let loggers = build_loggers(&LogDestination::Both(path.clone()), LevelFilter::Info).unwrap();

        assert_eq!(loggers.len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn single_destinations_build_one_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.log");

        let file = build_loggers(&LogDestination::File(path.clone()), LevelFilter::Warn).unwrap();
        let stderr = build_loggers(&LogDestination::Stderr, LevelFilter::Warn).unwrap();

        assert_eq!(file.len(), 1);
        assert_eq!(stderr.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn log_file_appends_instead_of_truncating() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.log");

        let mut first = open_log_file(&path).unwrap();
        writeln!(first, "first").unwrap();
        drop(first);
        let mut second = open_log_file(&path).unwrap();
        writeln!(second, "second").unwrap();
        drop(second);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }
}
