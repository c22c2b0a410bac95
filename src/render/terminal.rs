use std::io::{self, IsTerminal, Write};

use tracing::{debug, warn};

use super::{Assets, RenderTarget, Selector};
use crate::{ClockError, Result, cli::formatting::Colors};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Draws the clock as a single status line on a terminal.
///
/// The markup is only checked for the two slots; the stylesheet has no
/// terminal equivalent and is ignored after mounting.
pub struct TerminalSurface<W: Write> {
    out: W,
    styled: bool,
    time: String,
    date: String,
}

impl TerminalSurface<io::Stdout> {
    /// Surface writing to stdout, styled only when stdout is a terminal.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let styled = stdout.is_terminal();
        Self::new(stdout, styled)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Wraps `out`. With `styled` the line is redrawn in place using ANSI
    /// escapes; otherwise each redraw is written as a plain line.
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            time: String::new(),
            date: String::new(),
        }
    }

    /// Ends the in-place status line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.styled && !self.date.is_empty() {
            if let Err(e) = writeln!(self.out).and_then(|()| self.out.flush()) {
                warn!(error = %e, "Failed to finish clock line");
            }
        }
    }

    /// Consumes the surface and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) -> io::Result<()> {
        if self.styled {
            write!(
                self.out,
                "{CLEAR_LINE}{}{}{}  {}{}{}",
                Colors::BOLD,
                self.time,
                Colors::RESET,
                Colors::DIM,
                self.date,
                Colors::RESET
            )?;
        } else {
            writeln!(self.out, "{}  {}", self.time, self.date)?;
        }
        self.out.flush()
    }
}

impl<W: Write> RenderTarget for TerminalSurface<W> {
    fn mount(&mut self, assets: &Assets<'_>) -> Result<()> {
        let missing: Vec<&str> = [Selector::Time, Selector::Date]
            .into_iter()
            .filter(|selector| !assets.declares_class(selector.class_name()))
            .map(Selector::as_str)
            .collect();

        if !missing.is_empty() {
            return Err(ClockError::SurfaceMount {
                details: format!("markup has no element for {}", missing.join(", ")),
            });
        }

        debug!(
            stylesheet_bytes = assets.stylesheet.len(),
            markup_bytes = assets.markup.len(),
            "Mounted terminal surface"
        );
        Ok(())
    }

    fn set_text(&mut self, selector: Selector, text: &str) {
        match selector {
            Selector::Time => text.clone_into(&mut self.time),
            Selector::Date => {
                text.clone_into(&mut self.date);
                // Time is always written first, so a date write completes the frame.
                if let Err(e) = self.redraw() {
                    warn!(error = %e, "Failed to draw clock");
                }
            }
        }
    }
}
