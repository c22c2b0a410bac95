//! The periodic render loop.
//!
//! Renders once immediately, then once per tick, strictly in sequence.
//! A render always finishes before the next wait begins, so renders never
//! overlap.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{info, trace};

use crate::{
    clock::Clock,
    render::{RenderTarget, Renderer},
};

/// Time between renders.
pub const TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Source of "time to render again" signals.
#[async_trait]
pub trait Ticker: Send {
    /// Waits until the next tick is due.
    async fn tick(&mut self);
}

/// Ticker driven by the tokio timer.
///
/// The first tick fires one full period after creation, since the loop
/// renders immediately on its own. Ticks missed while the loop was busy
/// are skipped rather than fired in a burst.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// Ticker firing every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// What the scheduler is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next tick.
    Idle,
    /// Formatting and writing output.
    Rendering,
}

/// Owns everything needed to keep the clock up to date.
pub struct Scheduler<C, T, K> {
    renderer: Renderer,
    clock: C,
    target: T,
    ticker: K,
    state: SchedulerState,
    renders: u64,
}

impl<C, T, K> Scheduler<C, T, K>
where
    C: Clock,
    T: RenderTarget,
    K: Ticker,
{
    /// Creates an idle scheduler. Nothing is rendered until it runs.
    pub fn new(renderer: Renderer, clock: C, target: T, ticker: K) -> Self {
        Self {
            renderer,
            clock,
            target,
            ticker,
            state: SchedulerState::Idle,
            renders: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of renders performed so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// The render target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Consumes the scheduler and returns the render target.
    pub fn into_target(self) -> T {
        self.target
    }

    /// Performs one Idle -> Rendering -> Idle cycle.
    pub fn render_once(&mut self) {
        self.transition(SchedulerState::Rendering);
        self.renderer.update(self.clock.now(), &mut self.target);
        self.renders += 1;
        self.transition(SchedulerState::Idle);
    }

    /// Renders now and on every tick, forever.
    pub async fn run(&mut self) {
        self.run_until(std::future::pending()).await;
    }

    /// Renders now and on every tick until `shutdown` completes.
    ///
    /// Shutdown is only observed between renders, and it wins over a tick
    /// that becomes due at the same moment.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(interval = ?TICK_INTERVAL, "Starting clock loop");

        loop {
            self.render_once();

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!(renders = self.renders, "Clock loop stopped");
                    return;
                }
                () = self.ticker.tick() => {}
            }
        }
    }

    fn transition(&mut self, next: SchedulerState) {
        trace!(from = ?self.state, to = ?next, "Scheduler transition");
        self.state = next;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tokio::sync::oneshot;

    use super::*;
    use crate::{
        clock::FixedClock,
        config::ClockConfig,
        render::{MemorySurface, Selector},
    };

    fn renderer() -> Renderer {
        let config = ClockConfig {
            timezone: "UTC".to_string(),
            ..ClockConfig::default()
        };
        Renderer::new(config).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 5, 18, 4, 0).unwrap())
    }

    /// Fires a fixed number of ticks immediately, then signals `done` and
    /// never fires again.
    struct CountedTicker {
        remaining: usize,
        done: Option<oneshot::Sender<()>>,
    }

    #[async_trait]
    impl Ticker for CountedTicker {
        async fn tick(&mut self) {
            if self.remaining > 0 {
                self.remaining -= 1;
                return;
            }
            if let Some(done) = self.done.take() {
                let _ = done.send(());
            }
            std::future::pending::<()>().await;
        }
    }

    #[test]
    fn render_once_returns_to_idle() {
        let mut scheduler = Scheduler::new(
            renderer(),
            clock(),
            MemorySurface::new(),
            CountedTicker {
                remaining: 0,
                done: None,
            },
        );
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        scheduler.render_once();

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.renders(), 1);
        assert_eq!(scheduler.target().text(Selector::Time), Some("18:04"));
        assert_eq!(
            scheduler.target().text(Selector::Date),
            Some("Thursday, June 5")
        );
    }

    #[tokio::test]
    async fn renders_once_before_first_tick_and_once_per_tick() {
        let (done_tx, done_rx) = oneshot::channel();
        let ticker = CountedTicker {
            remaining: 3,
            done: Some(done_tx),
        };
        let mut scheduler = Scheduler::new(renderer(), clock(), MemorySurface::new(), ticker);

        scheduler
            .run_until(async {
                let _ = done_rx.await;
            })
            .await;

        assert_eq!(scheduler.renders(), 4);
        assert_eq!(scheduler.target().writes().len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn thirty_five_seconds_yields_four_renders() {
        let mut scheduler = Scheduler::new(
            renderer(),
            clock(),
            MemorySurface::new(),
            IntervalTicker::default(),
        );
        let started = Instant::now();

        scheduler
            .run_until(time::sleep(Duration::from_secs(35)))
            .await;

        assert_eq!(scheduler.renders(), 4);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(35) && elapsed < Duration::from_secs(40));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_shutdown_still_renders_once() {
        let mut scheduler = Scheduler::new(
            renderer(),
            clock(),
            MemorySurface::new(),
            IntervalTicker::default(),
        );

        scheduler.run_until(async {}).await;

        assert_eq!(scheduler.renders(), 1);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }
}
