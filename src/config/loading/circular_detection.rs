use crate::{ClockError, Result};
use std::path::{Path, PathBuf};

/// Tracks the chain of files currently being imported.
#[derive(Default)]
pub struct CircularDetector {
    import_chain: Vec<PathBuf>,
}

impl CircularDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `path` is already part of the active import chain.
    pub fn check(&self, path: &Path) -> Result<()> {
        if !self.import_chain.iter().any(|p| p == path) {
            return Ok(());
        }

        let chain = self
            .import_chain
            .iter()
            .map(|p| file_label(p))
            .chain(std::iter::once(file_label(path)))
            .collect::<Vec<_>>()
            .join(" -> ");

        Err(ClockError::ConfigValidation {
            component: "import system".to_string(),
            details: format!("Circular import detected: {chain}"),
        })
    }

    pub fn push(&mut self, path: &Path) {
        self.import_chain.push(path.to_path_buf());
    }

    pub fn pop(&mut self) {
        self.import_chain.pop();
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}
