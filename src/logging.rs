/// Structured logging for the ride monitoring service
///
/// Provides context-rich logging with component and ride identifiers,
/// timestamps, and severity levels. Supports both console output
/// and file-based logging for daemon operations.

use crate::model::MonitorError;
use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

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
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(MonitorError::Configuration(format!(
                "unknown log level '{}'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Feed,
    Tracker,
    Notify,
    Api,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Feed => write!(f, "FEED"),
            Component::Tracker => write!(f, "TRACKER"),
            Component::Notify => write!(f, "NOTIFY"),
            Component::Api => write!(f, "API"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - e.g. shutdown while a fetch was in flight
    Expected,
    /// Unexpected failure - indicates an outage or configuration issue
    Unexpected,
    /// Unknown - the park may simply be closed or out of season
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

        *LOGGER.lock().unwrap_or_else(PoisonError::into_inner) = Some(logger);
    }

    fn log(&self, level: LogLevel, component: Component, ride: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let ride_part = ride.map(|r| format!(" [{}]", r)).unwrap_or_default();
        let log_entry = format_entry(&timestamp.to_string(), level, component, ride, message);

        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, ride_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, ride_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        }

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

/// One log line: `<timestamp> <LEVEL> <COMPONENT>[ [ride]]: <message>`.
fn format_entry(
    timestamp: &str,
    level: LogLevel,
    component: Component,
    ride: Option<&str>,
    message: &str,
) -> String {
    let ride_part = ride.map(|r| format!(" [{}]", r)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, component, ride_part, message)
}

fn with_logger(level: LogLevel, component: Component, ride: Option<&str>, message: &str) {
    let guard = LOGGER.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(logger) = guard.as_ref() {
        logger.log(level, component, ride, message);
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Log a general informational message
pub fn info(component: Component, ride: Option<&str>, message: &str) {
    with_logger(LogLevel::Info, component, ride, message);
}

/// Log a warning message
pub fn warn(component: Component, ride: Option<&str>, message: &str) {
    with_logger(LogLevel::Warning, component, ride, message);
}

/// Log an error message
pub fn error(component: Component, ride: Option<&str>, message: &str) {
    with_logger(LogLevel::Error, component, ride, message);
}

/// Log a debug message
pub fn debug(component: Component, ride: Option<&str>, message: &str) {
    with_logger(LogLevel::Debug, component, ride, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a failed monitoring cycle by its error
pub fn classify_cycle_failure(err: &MonitorError) -> FailureType {
    match err {
        MonitorError::Cancelled => FailureType::Expected,
        // An empty or land-less feed usually means the park is closed for
        // the day or the season, not that anything is broken.
        MonitorError::EmptyFeed | MonitorError::NoQualifyingRides => FailureType::Unknown,
        MonitorError::Configuration(_)
        | MonitorError::HttpError(_)
        | MonitorError::ParseError(_)
        | MonitorError::Transport(_) => FailureType::Unexpected,
    }
}

/// Component a cycle error originated from
fn component_for(err: &MonitorError) -> Component {
    match err {
        MonitorError::EmptyFeed | MonitorError::NoQualifyingRides => Component::Tracker,
        MonitorError::Configuration(_) => Component::System,
        _ => Component::Feed,
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a cycle failure with automatic classification
pub fn log_cycle_failure(err: &MonitorError) {
    let failure_type = classify_cycle_failure(err);
    let message = format!("Monitoring cycle failed [{}]: {}", failure_type, err);
    let component = component_for(err);

    match failure_type {
        FailureType::Expected => debug(component, None, &message),
        FailureType::Unexpected => error(component, None, &message),
        FailureType::Unknown => warn(component, None, &message),
    }
}

// ---------------------------------------------------------------------------
// Cycle Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of one completed cycle
pub fn log_cycle_summary(rides_evaluated: usize, alerts: usize) {
    let message = format!(
        "Cycle complete: {} rides evaluated, {} alerts",
        rides_evaluated, alerts
    );
    info(Component::Tracker, None, &message);
}
