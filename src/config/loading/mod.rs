mod circular_detection;
mod merging;

use super::{Config, ConfigFile, ConfigPaths};
use crate::{ClockError, Result};
use circular_detection::CircularDetector;
use merging::merge_documents;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use toml::Value;
use tracing::{debug, instrument};

const IMPORTS_KEY: &str = "imports";

impl Config {
    /// Loads the effective configuration.
    ///
    /// With an explicit `path` the file must exist. Without one the
    /// default location from [`ConfigPaths::main_config`] is tried, and a
    /// missing file there simply means "use the defaults".
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, is not valid TOML, has a
    /// circular import, or does not match the config schema.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Config> {
        if let Some(path) = path {
            return Self::load_with_imports(path);
        }

        Self::load_default(ConfigPaths::main_config())
    }

    fn load_default(default_path: io::Result<PathBuf>) -> Result<Config> {
        let default_path = match default_path {
            Ok(path) => path,
            Err(e) => {
                debug!(error = %e, "No config directory, using defaults");
                return Ok(Config::default());
            }
        };

        if !default_path.exists() {
            debug!(path = %default_path.display(), "No config file found, using defaults");
            return Ok(Config::default());
        }

        Self::load_with_imports(&default_path)
    }

    /// Loads a configuration file and everything it imports.
    ///
    /// Imports are listed under the top-level `imports` key using an `@`
    /// prefix and resolve relative to the importing file; `.toml` is added
    /// when no extension is given. Imported files merge first, in order,
    /// and the importing file takes precedence over all of them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read
    /// - The TOML content is invalid
    /// - Any imported files cannot be loaded
    /// - The merged configuration is invalid
    /// - Circular imports are detected
    pub fn load_with_imports(path: &Path) -> Result<Config> {
        let canonical_path = path.canonicalize()?;

        let mut detector = CircularDetector::new();
        let document = Self::load_document(&canonical_path, &mut detector)?;

        Self::from_document(document)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// Imports are not supported here since there is no file to resolve
    /// them against.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML, lists imports,
    /// or does not match the config schema.
    pub fn from_toml_str(source: &str) -> Result<Config> {
        let mut document: Value =
            toml::from_str(source).map_err(|e| ClockError::toml_parse(e, None))?;

        if !Self::take_import_paths(&mut document)?.is_empty() {
            return Err(ClockError::ConfigValidation {
                component: "import system".to_string(),
                details: "imports require a config file to resolve against".to_string(),
            });
        }

        Self::from_document(document)
    }

    fn from_document(document: Value) -> Result<Config> {
        let file: ConfigFile = document
            .try_into()
            .map_err(|e| ClockError::ConfigValidation {
                component: "config parsing".to_string(),
                details: format!("Configuration validation failed: {e}"),
            })?;

        Ok(Config::from(file))
    }

    fn load_document(path: &Path, detector: &mut CircularDetector) -> Result<Value> {
        detector.check(path)?;
        detector.push(path);

        let result = Self::read_and_merge(path, detector);
        detector.pop();
        result
    }

    fn read_and_merge(path: &Path, detector: &mut CircularDetector) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| ClockError::import(e, path))?;
        let mut document: Value =
            toml::from_str(&content).map_err(|e| ClockError::toml_parse(e, Some(path)))?;

        let imported = Self::take_import_paths(&mut document)?
            .iter()
            .map(|import| {
                let resolved = Self::resolve_import_path(path, import)?;
                let canonical = resolved
                    .canonicalize()
                    .map_err(|e| ClockError::import(e, &resolved))?;
                Self::load_document(&canonical, detector)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(path = %path.display(), imports = imported.len(), "Loaded config file");
        Ok(merge_documents(imported, document))
    }

    /// Removes the `imports` key and returns the listed paths without `@`.
    fn take_import_paths(document: &mut Value) -> Result<Vec<String>> {
        let Value::Table(table) = document else {
            return Ok(Vec::new());
        };

        let imports = match table.remove(IMPORTS_KEY) {
            None => return Ok(Vec::new()),
            Some(Value::Array(imports)) => imports,
            Some(other) => return Err(invalid_imports(other.type_str())),
        };

        imports
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(|s| s.strip_prefix('@').unwrap_or(s).to_owned())
                    .ok_or_else(|| invalid_imports(entry.type_str()))
            })
            .collect()
    }

    fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf> {
        let parent_dir = base_path
            .parent()
            .ok_or_else(|| ClockError::ImportError {
                path: base_path.to_path_buf(),
                details: "Invalid base path - no parent directory".to_string(),
            })?;

        let mut import_path_buf = PathBuf::from(import_path);
        if import_path_buf.extension().is_none() {
            import_path_buf.set_extension("toml");
        }

        Ok(parent_dir.join(import_path_buf))
    }
}

fn invalid_imports(found: &str) -> ClockError {
    ClockError::ConfigValidation {
        component: "import system".to_string(),
        details: format!("`imports` must be an array of strings, found {found}"),
    }
}
