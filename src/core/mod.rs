use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Error types for the clock module.
///
/// Every variant is a setup failure. Once the render loop is running
/// nothing in this crate can fail.
#[derive(Error, Debug)]
pub enum ClockError {
    /// Configuration did not match the expected schema
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Import operation error with file context
    #[error("failed to import '{path}': {details}")]
    ImportError {
        /// Path of file being imported
        path: PathBuf,
        /// Import error details
        details: String,
    },

    /// The configured timezone is not a known identifier
    #[error("invalid timezone '{name}': {details}")]
    InvalidTimezone {
        /// Timezone name as it appeared in the configuration
        name: String,
        /// Underlying lookup error
        details: String,
    },

    /// The render target refused the static presentation
    #[error("failed to mount render surface: {details}")]
    SurfaceMount {
        /// Why the surface could not be mounted
        details: String,
    },
}

/// A specialized `Result` type for clock operations.
pub type Result<T> = result::Result<T, ClockError>;

impl ClockError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ClockError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an import error with file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying import error
    /// * `path` - Path to the file that failed to import
    pub fn import(error: impl fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        ClockError::ImportError {
            path: clean_path,
            details: error.to_string(),
        }
    }

    /// Creates a timezone resolution error.
    pub fn invalid_timezone(name: &str, error: impl fmt::Display) -> Self {
        ClockError::InvalidTimezone {
            name: name.to_string(),
            details: error.to_string(),
        }
    }
}
