use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default time layout: 24-hour clock, hours and minutes.
pub const DEFAULT_TIME_FORMAT: &str = "15:04";

/// Default date layout: full weekday, full month name, day of month.
pub const DEFAULT_DATE_FORMAT: &str = "Monday, January 2";

/// Default timezone: whatever the host system uses.
pub const DEFAULT_TIMEZONE: &str = "Local";

/// Resolved clock settings.
///
/// Built once from the defaults plus any overrides and never modified
/// afterwards. Layouts use reference-time tokens (see [`crate::clock::layout`]),
/// so `"15:04"` renders as hours and minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockConfig {
    /// Layout for the time line.
    pub time_format: String,

    /// Layout for the date line.
    pub date_format: String,

    /// IANA timezone name. `"Local"` or an empty string use the system zone.
    pub timezone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl ClockConfig {
    /// Applies overrides field by field.
    ///
    /// Fields left as `None` keep their current value. An explicit empty
    /// string is a real value and replaces the current one.
    pub fn merge(self, overrides: ClockOverrides) -> Self {
        Self {
            time_format: overrides.time_format.unwrap_or(self.time_format),
            date_format: overrides.date_format.unwrap_or(self.date_format),
            timezone: overrides.timezone.unwrap_or(self.timezone),
        }
    }
}

/// Externally supplied clock settings where every field is optional.
///
/// This is the shape of the `[clock]` table in a config file and of the
/// command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClockOverrides {
    /// Layout for the time line.
    #[serde(alias = "TimeFormat", skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,

    /// Layout for the date line.
    #[serde(alias = "DateFormat", skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,

    /// IANA timezone name. `"Local"` or an empty string use the system zone.
    #[serde(alias = "Timezone", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
