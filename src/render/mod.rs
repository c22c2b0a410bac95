//! Turning an instant into display text and pushing it to a surface.

mod assets;
mod memory;
mod terminal;

pub use assets::Assets;
pub use memory::MemorySurface;
pub use terminal::TerminalSurface;

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    Result,
    clock::{Location, layout},
    config::ClockConfig,
};

/// Named output slot on a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// The `.time` element.
    Time,
    /// The `.date` element.
    Date,
}

impl Selector {
    /// CSS selector for this slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Selector::Time => ".time",
            Selector::Date => ".date",
        }
    }

    /// Class name without the leading dot.
    pub fn class_name(self) -> &'static str {
        &self.as_str()[1..]
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface the clock draws into.
pub trait RenderTarget {
    /// Installs the static presentation. Called once, before any text is set.
    ///
    /// # Errors
    /// Returns [`crate::ClockError::SurfaceMount`] if the surface cannot
    /// display the clock, for example when the markup lacks a slot.
    fn mount(&mut self, assets: &Assets<'_>) -> Result<()>;

    /// Replaces the text of the element matching `selector`.
    fn set_text(&mut self, selector: Selector, text: &str);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn mount(&mut self, assets: &Assets<'_>) -> Result<()> {
        (**self).mount(assets)
    }

    fn set_text(&mut self, selector: Selector, text: &str) {
        (**self).set_text(selector, text);
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn mount(&mut self, assets: &Assets<'_>) -> Result<()> {
        (**self).mount(assets)
    }

    fn set_text(&mut self, selector: Selector, text: &str) {
        (**self).set_text(selector, text);
    }
}

/// Text produced by a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Formatted time line.
    pub time: String,
    /// Formatted date line.
    pub date: String,
}

/// Formats instants using a fixed config and location.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: ClockConfig,
    location: Location,
}

impl Renderer {
    /// Resolves the configured timezone and builds a renderer.
    ///
    /// # Errors
    /// Returns [`crate::ClockError::InvalidTimezone`] if the timezone is unknown.
    pub fn new(config: ClockConfig) -> Result<Self> {
        let location = Location::load(&config.timezone)?;
        Ok(Self::with_location(config, location))
    }

    /// Builds a renderer from an already resolved location.
    pub fn with_location(config: ClockConfig, location: Location) -> Self {
        Self { config, location }
    }

    /// The config this renderer formats with.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// The resolved location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Formats `instant` into time and date strings.
    pub fn render(&self, instant: DateTime<Utc>) -> RenderOutput {
        let zoned = self.location.zoned(instant);

        RenderOutput {
            time: layout::format(&zoned, &self.config.time_format),
            date: layout::format(&zoned, &self.config.date_format),
        }
    }

    /// Renders `instant`, writes both strings to `target` and returns them.
    pub fn update<T: RenderTarget + ?Sized>(
        &self,
        instant: DateTime<Utc>,
        target: &mut T,
    ) -> RenderOutput {
        let output = self.render(instant);
        debug!(time = %output.time, date = %output.date, "Rendered clock");

        target.set_text(Selector::Time, &output.time);
        target.set_text(Selector::Date, &output.date);
        output
    }
}
