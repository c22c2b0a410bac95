use std::{env, error::Error, io, path::Path};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogLevel;

/// Environment variable selecting `json` or `pretty` log output.
pub const LOG_FORMAT_ENV: &str = "GLASS_CLOCK_LOG_FORMAT";

const DAYS_TO_KEEP: usize = 7;

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

fn wants_json() -> bool {
    env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json")
}

/// Initialize tracing for the application
///
/// Logs go to stderr so they never interleave with the clock on stdout.
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(level: LogLevel) -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    if wants_json() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize tracing with file output
///
/// Same as [`init`] but additionally writes daily-rotated log files into
/// `log_dir`, keeping a week of history.
///
/// # Errors
/// Returns error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init_with_file(level: LogLevel, log_dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("glass-clock")
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(level));

    if wants_json() {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    std::mem::forget(guard);

    Ok(())
}
