/// Structured logging for the rainfall site builder
///
/// Provides context-rich logging with period/file identifiers,
/// timestamps, and severity levels. Supports both console output
/// and file-based logging for scheduled builds.

use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Log Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Fetch,
    Parse,
    Table,
    Chart,
    Site,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Fetch => write!(f, "FETCH"),
            LogSource::Parse => write!(f, "PARSE"),
            LogSource::Table => write!(f, "TABLE"),
            LogSource::Chart => write!(f, "CHART"),
            LogSource::Site => write!(f, "SITE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the period file is not published yet
    Expected,
    /// Unexpected failure - server error, network outage or unreadable file
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn log(&self, level: LogLevel, source: &LogSource, subject: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let subject_part = subject.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format_entry(level, source, subject, message);

        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, subject_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, subject_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {}
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// One log line: `2024-07-01 06:00:00 UTC WARN FETCH [june]: message`
pub fn format_entry(level: LogLevel, source: &LogSource, subject: Option<&str>, message: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let subject_part = subject.map(|s| format!(" [{}]", s)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, source, subject_part, message)
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn emit(level: LogLevel, source: LogSource, subject: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, &source, subject, message);
        }
    }
}

/// Log a general informational message
pub fn info(source: LogSource, subject: Option<&str>, message: &str) {
    emit(LogLevel::Info, source, subject, message);
}

/// Log a warning message
pub fn warn(source: LogSource, subject: Option<&str>, message: &str) {
    emit(LogLevel::Warning, source, subject, message);
}

/// Log an error message
pub fn error(source: LogSource, subject: Option<&str>, message: &str) {
    emit(LogLevel::Error, source, subject, message);
}

/// Log a debug message
pub fn debug(source: LogSource, subject: Option<&str>, message: &str) {
    emit(LogLevel::Debug, source, subject, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a period CSV retrieval failure.
pub fn classify_fetch_failure(err: &FetchError) -> FailureType {
    match err {
        // Later months are routinely missing early in the season.
        FetchError::Http { status: 404, .. } => FailureType::Expected,
        FetchError::Http { status, .. } if *status >= 500 => FailureType::Unexpected,
        FetchError::Http { .. } => FailureType::Unknown,
        FetchError::Transport { .. } | FetchError::Io { .. } => FailureType::Unexpected,
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a fetch failure with automatic classification
pub fn log_fetch_failure(period: &str, operation: &str, err: &FetchError) {
    let failure_type = classify_fetch_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => warn(LogSource::Fetch, Some(period), &message),
        FailureType::Unexpected => error(LogSource::Fetch, Some(period), &message),
        FailureType::Unknown => warn(LogSource::Fetch, Some(period), &message),
    }
}

// ---------------------------------------------------------------------------
// Build Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a site build
pub fn log_build_summary(total: usize, successful: usize, failed: usize) {
    let message = format!(
        "Build complete: {}/{} pages written, {} failed",
        successful,
        total,
        failed
    );

    if failed == 0 {
        info(LogSource::Site, None, &message);
    } else if successful == 0 {
        error(LogSource::Site, None, &message);
    } else {
        warn(LogSource::Site, None, &message);
    }
}
