use tracing::{info, info_span};

use crate::{
    Result,
    clock::Clock,
    config::ClockConfig,
    render::{Assets, RenderTarget, RenderOutput, Renderer},
    scheduler::{Scheduler, Ticker},
};

const MODULE_NAME: &str = "clock";

/// A clock that has passed setup and is ready to render.
///
/// Setup resolves the timezone before touching the target, so a bad
/// timezone leaves the target without a single mount or write.
pub struct ClockModule<T> {
    renderer: Renderer,
    target: T,
}

impl<T: RenderTarget> ClockModule<T> {
    /// Resolves `config` and mounts `assets` on `target`.
    ///
    /// # Errors
    /// Returns [`crate::ClockError::InvalidTimezone`] for an unknown
    /// timezone and [`crate::ClockError::SurfaceMount`] if the target
    /// rejects the assets.
    pub fn setup(config: ClockConfig, assets: &Assets<'_>, mut target: T) -> Result<Self> {
        let span = info_span!("clock_module", module = MODULE_NAME);
        let _entered = span.enter();

        info!(
            timezone = %config.timezone,
            time_format = %config.time_format,
            date_format = %config.date_format,
            "Loading module"
        );

        let renderer = Renderer::new(config)?;
        target.mount(assets)?;

        info!(location = %renderer.location(), "Module ready");
        Ok(Self { renderer, target })
    }

    /// The renderer built during setup.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Renders the current instant once and returns what was written.
    pub fn render_now<C: Clock>(&mut self, clock: &C) -> RenderOutput {
        self.renderer.update(clock.now(), &mut self.target)
    }

    /// Hands the module over to a scheduler.
    pub fn scheduler<C: Clock, K: Ticker>(self, clock: C, ticker: K) -> Scheduler<C, T, K> {
        Scheduler::new(self.renderer, clock, self.target, ticker)
    }

    /// Consumes the module and returns the render target.
    pub fn into_target(self) -> T {
        self.target
    }
}
