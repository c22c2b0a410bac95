mod log_level;

use std::path::PathBuf;

pub use log_level::LogLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Process-wide settings that are not specific to the clock itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Logging level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory for rotated log files. Logs only go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}
