//! Command-line interface for the `glass-clock` binary.

pub mod formatting;

use std::path::PathBuf;

use clap::Parser;

use crate::config::ClockOverrides;

/// Shows the current time and date, refreshed every ten seconds.
#[derive(Debug, Clone, Parser)]
#[command(name = "glass-clock", version, about)]
pub struct Cli {
    /// Config file to load instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Time layout, e.g. "15:04" or "3:04 PM".
    #[arg(long, value_name = "LAYOUT", env = "GLASS_CLOCK_TIME_FORMAT")]
    pub time_format: Option<String>,

    /// Date layout, e.g. "Monday, January 2" or "2006-01-02".
    #[arg(long, value_name = "LAYOUT", env = "GLASS_CLOCK_DATE_FORMAT")]
    pub date_format: Option<String>,

    /// IANA timezone name; "Local" or "" for the system zone.
    #[arg(long, value_name = "NAME", env = "GLASS_CLOCK_TIMEZONE")]
    pub timezone: Option<String>,

    /// Render a single frame and exit.
    #[arg(long)]
    pub once: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long, conflicts_with_all = ["once", "schema"])]
    pub print_config: bool,

    /// Print the JSON schema of the config file and exit.
    #[arg(long, conflicts_with = "once")]
    pub schema: bool,
}

impl Cli {
    /// Clock settings given on the command line or through the environment.
    pub fn overrides(&self) -> ClockOverrides {
        ClockOverrides {
            time_format: self.time_format.clone(),
            date_format: self.date_format.clone(),
            timezone: self.timezone.clone(),
        }
    }
}
