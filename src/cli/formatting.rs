//! Formatting helpers for diagnostics printed to the terminal.

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
}

/// Formats an error message for display on stderr.
pub fn format_error(message: &str) -> String {
    format!(
        "{}{}error:{} {message}",
        Colors::BOLD,
        Colors::RED,
        Colors::RESET
    )
}
