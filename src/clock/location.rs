use std::fmt;

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use super::ZonedTime;
use crate::{ClockError, Result};

const LOCAL: &str = "Local";

/// Timezone used to turn an instant into calendar and clock fields.
///
/// Resolved once during setup and read on every tick afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The host system's zone, re-read from the environment on each conversion.
    Local,
    /// A zone from the IANA database.
    Zone(Tz),
}

impl Location {
    /// Resolves a timezone name.
    ///
    /// An empty name and `"Local"` both mean the system zone. Anything else
    /// must be an IANA identifier such as `"Europe/Berlin"` or `"UTC"`.
    ///
    /// # Errors
    /// Returns [`ClockError::InvalidTimezone`] for unknown names.
    pub fn load(name: &str) -> Result<Self> {
        if name.is_empty() || name == LOCAL {
            return Ok(Location::Local);
        }

        name.parse::<Tz>()
            .map(Location::Zone)
            .map_err(|e| ClockError::invalid_timezone(name, e))
    }

    /// Converts `instant` into this location's local representation.
    pub fn zoned(&self, instant: DateTime<Utc>) -> ZonedTime {
        match self {
            Location::Local => ZonedTime::from_datetime(&instant.with_timezone(&Local)),
            Location::Zone(tz) => {
                ZonedTime::from_datetime(&instant.with_timezone(tz)).or_numeric_abbreviation()
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local => f.write_str(LOCAL),
            Location::Zone(tz) => f.write_str(tz.name()),
        }
    }
}
