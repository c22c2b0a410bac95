use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from critical errors only
/// to detailed trace information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only setup failures.
    Error,

    /// Warnings and errors.
    Warn,

    /// Module lifecycle messages, warnings and errors (default level).
    #[default]
    Info,

    /// Per-tick render output.
    Debug,

    /// Scheduler state transitions (very verbose).
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
