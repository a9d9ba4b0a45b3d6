/// Structured logging for the rocket specification service
///
/// Provides context-rich logging with a source tag (which upstream API or
/// subsystem), an optional subject (a URL, a rocket name, a file path),
/// timestamps, and severity levels. Supports both console output and
/// file-based logging. Nothing is emitted until `init_logger` is called,
/// so library callers and tests stay quiet by default.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
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

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Log Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    SpaceX,
    OpenMeteo,
    Config,
    Output,
    System,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::SpaceX => write!(f, "SPACEX"),
            Source::OpenMeteo => write!(f, "METEO"),
            Source::Config => write!(f, "CONFIG"),
            Source::Output => write!(f, "OUTPUT"),
            Source::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - e.g. the upstream is known to be rate limiting
    Expected,
    /// Unexpected failure - indicates an API change or configuration issue
    Unexpected,
    /// Unknown - likely transient, cannot tell until the retry budget is spent
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

fn global() -> MutexGuard<'static, Option<Logger>> {
    // A panic while logging must not silence every later message.
    LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        *global() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: Source, subject: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let subject_part = subject.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, subject_part, message
        );

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("ERROR: {}{}: {}", source, subject_part, message),
                LogLevel::Warning => eprintln!("WARNING: {}{}: {}", source, subject_part, message),
                LogLevel::Info => println!("{}", message),
                LogLevel::Debug => println!("[DEBUG] {}", message),
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Initialize the global logger from `LOG_LEVEL`, `LOG_FILE` and `LOG_TIMESTAMPS`.
///
/// An unparseable `LOG_LEVEL` falls back to `Info` with a warning.
pub fn init_from_env() {
    let raw_level = std::env::var("LOG_LEVEL").ok();
    let (level, bad_level) = match raw_level.as_deref().map(LogLevel::from_str) {
        Some(Ok(level)) => (level, None),
        Some(Err(e)) => (LogLevel::Info, Some(e)),
        None => (LogLevel::Info, None),
    };
    let log_file = std::env::var("LOG_FILE").ok().filter(|p| !p.trim().is_empty());
    let timestamps = std::env::var("LOG_TIMESTAMPS")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    init_logger(level, log_file.as_deref(), timestamps);

    if let Some(e) = bad_level {
        warn(Source::System, None, &format!("{}; using INFO", e));
    }
}

/// Log a general informational message
pub fn info(source: Source, subject: Option<&str>, message: &str) {
    if let Some(logger) = global().as_ref() {
        logger.log(LogLevel::Info, source, subject, message);
    }
}

/// Log a warning message
pub fn warn(source: Source, subject: Option<&str>, message: &str) {
    if let Some(logger) = global().as_ref() {
        logger.log(LogLevel::Warning, source, subject, message);
    }
}

/// Log an error message
pub fn error(source: Source, subject: Option<&str>, message: &str) {
    if let Some(logger) = global().as_ref() {
        logger.log(LogLevel::Error, source, subject, message);
    }
}

/// Log a debug message
pub fn debug(source: Source, subject: Option<&str>, message: &str) {
    if let Some(logger) = global().as_ref() {
        logger.log(LogLevel::Debug, source, subject, message);
    }
}

// ---------------------------------------------------------------------------
// Fetch Failure Logging
// ---------------------------------------------------------------------------

/// Classify a failed HTTP attempt.
///
/// Server errors, timeouts and connection failures are usually transient, so
/// they stay `Unknown` until the retry budget says otherwise. Client errors
/// and unparseable bodies point at a changed API or a bad URL.
pub fn classify_fetch_failure(err: &FetchError) -> FailureType {
    match err {
        FetchError::HttpStatus(429) => FailureType::Expected,
        FetchError::HttpStatus(code) if *code >= 500 => FailureType::Unknown,
        FetchError::HttpStatus(_) => FailureType::Unexpected,
        FetchError::Timeout(_) | FetchError::Request(_) => FailureType::Unknown,
        FetchError::InvalidJson(_) => FailureType::Unexpected,
        FetchError::Exhausted { .. } => FailureType::Unexpected,
    }
}

/// Log one failed attempt out of the retry budget.
pub fn log_attempt_failure(source: Source, url: &str, attempt: u32, max_attempts: u32, err: &FetchError) {
    let failure_type = classify_fetch_failure(err);
    let message = format!(
        "Fetch failed (Attempt {}/{}) [{}]: {}",
        attempt, max_attempts, failure_type, err
    );

    match failure_type {
        FailureType::Expected => warn(source, Some(url), &message),
        FailureType::Unexpected | FailureType::Unknown => error(source, Some(url), &message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parses_common_spellings() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(" warn ".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(classify_fetch_failure(&FetchError::HttpStatus(503)), FailureType::Unknown);
        assert_eq!(classify_fetch_failure(&FetchError::HttpStatus(404)), FailureType::Unexpected);
        assert_eq!(classify_fetch_failure(&FetchError::HttpStatus(429)), FailureType::Expected);
        assert_eq!(
            classify_fetch_failure(&FetchError::Timeout("operation timed out".into())),
            FailureType::Unknown
        );
        assert_eq!(
            classify_fetch_failure(&FetchError::InvalidJson("expected value".into())),
            FailureType::Unexpected
        );
    }
}
