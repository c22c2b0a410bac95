use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "glass-clock";

/// Locates configuration files following the XDG Base Directory specification.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// Checks `XDG_CONFIG_HOME` first and falls back to `$HOME/.config`.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, Error> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })?;

        Ok(PathBuf::from(config_home).join(APP_DIR))
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
