//! Wall-clock access, timezone resolution and layout formatting.

pub mod layout;
mod location;

pub use layout::{ZonedTime, format};
pub use location::Location;

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Lets the render path run against a fixed instant in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
