//! Configuration schema definitions and loading.
//!
//! A config file is a TOML document with a `[general]` table and a
//! `[clock]` table. Every clock field is optional; missing fields fall
//! back to the defaults in [`ClockConfig`].

mod clock;
mod general;
mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use clock::{
    ClockConfig, ClockOverrides, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, DEFAULT_TIMEZONE,
};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// On-disk representation of a configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    /// Other config files merged underneath this one, written as `"@name"`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    /// General application settings.
    pub general: GeneralConfig,

    /// Clock settings. Unset fields keep their defaults.
    pub clock: ClockOverrides,
}

/// Effective configuration after defaults and every override are applied.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// General application settings.
    pub general: GeneralConfig,

    /// Resolved clock settings.
    pub clock: ClockConfig,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            general: file.general,
            clock: ClockConfig::default().merge(file.clock),
        }
    }
}

impl Config {
    /// Applies clock overrides on top of the current values.
    pub fn with_overrides(self, overrides: ClockOverrides) -> Self {
        Self {
            general: self.general,
            clock: self.clock.merge(overrides),
        }
    }
}
