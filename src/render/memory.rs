use super::{Assets, RenderTarget, Selector};
use crate::Result;

/// Render target that keeps everything in memory.
///
/// Useful for embedding the clock in a host that pulls values instead of
/// receiving pushes, and for asserting on exactly what was written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    stylesheet: Option<String>,
    markup: Option<String>,
    mounts: usize,
    writes: Vec<(Selector, String)>,
}

impl MemorySurface {
    /// Creates an empty, unmounted surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times static presentation was mounted.
    pub fn mounts(&self) -> usize {
        self.mounts
    }

    /// Every text write in the order it happened.
    pub fn writes(&self) -> &[(Selector, String)] {
        &self.writes
    }

    /// The most recent text written to `selector`.
    pub fn text(&self, selector: Selector) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(s, _)| *s == selector)
            .map(|(_, text)| text.as_str())
    }

    /// Mounted stylesheet, if any.
    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }

    /// Mounted markup, if any.
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }
}

impl RenderTarget for MemorySurface {
    fn mount(&mut self, assets: &Assets<'_>) -> Result<()> {
        self.stylesheet = Some(assets.stylesheet.to_string());
        self.markup = Some(assets.markup.to_string());
        self.mounts += 1;
        Ok(())
    }

    fn set_text(&mut self, selector: Selector, text: &str) {
        self.writes.push((selector, text.to_string()));
    }
}
