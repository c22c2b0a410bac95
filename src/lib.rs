//! Glass Clock - periodically renders the current time and date.
//!
//! The crate is split the way the data flows:
//!
//! - [`config`] resolves layouts and the timezone name from defaults, TOML
//!   files and command line overrides
//! - [`clock`] resolves the timezone and formats reference-time layouts
//! - [`render`] produces the two display strings and writes them to a
//!   [`render::RenderTarget`]
//! - [`scheduler`] renders immediately and then every ten seconds
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use glass_clock::{
//!     ClockModule,
//!     clock::SystemClock,
//!     config::ClockConfig,
//!     render::{Assets, TerminalSurface},
//!     scheduler::IntervalTicker,
//! };
//!
//! # async fn run() -> glass_clock::Result<()> {
//! let module = ClockModule::setup(
//!     ClockConfig::default(),
//!     &Assets::embedded(),
//!     TerminalSurface::stdout(),
//! )?;
//! module
//!     .scheduler(SystemClock, IntervalTicker::default())
//!     .run()
//!     .await;
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Wall-clock access, timezone resolution and layout formatting.
pub mod clock;

/// Render engine and render targets.
pub mod render;

/// Periodic render loop.
pub mod scheduler;

/// Command-line interface.
pub mod cli;

/// Logging setup for the binary.
pub mod tracing_config;

mod module;

pub use crate::core::{ClockError, Result};
pub use module::ClockModule;
