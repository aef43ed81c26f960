//! A running game: an engine paired with its tick scheduler.
//!
//! The session keeps the two in step. A level-up restarts the scheduler at
//! the new period, a game-over stops it, and pause requests reach both.

use tracing::debug;

use crate::engine::{Control, SimulationEngine, TickReport};
use crate::rng::{RandomSource, SeededRandom};
use crate::scheduler::{Clock, SchedulerState, SystemClock, TickScheduler};

/// Engine plus scheduler.
#[derive(Debug)]
pub struct Session<R = SeededRandom, C = SystemClock> {
    engine: SimulationEngine<R>,
    scheduler: TickScheduler<C>,
}

impl<R: RandomSource, C: Clock> Session<R, C> {
    /// Pair an engine with a clock. Nothing runs until [`Session::start`].
    #[must_use]
    pub const fn new(engine: SimulationEngine<R>, clock: C) -> Self {
        Self {
            engine,
            scheduler: TickScheduler::new(clock),
        }
    }

    /// The engine.
    #[must_use]
    pub const fn engine(&self) -> &SimulationEngine<R> {
        &self.engine
    }

    /// The engine, for direct intents such as steering.
    pub fn engine_mut(&mut self) -> &mut SimulationEngine<R> {
        &mut self.engine
    }

    /// The scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &TickScheduler<C> {
        &self.scheduler
    }

    /// Start a new game and its timer.
    pub fn start(&mut self) {
        self.engine.start();
        self.scheduler.start(self.engine.tick_period());
    }

    /// Same as [`Session::start`].
    pub fn restart(&mut self) {
        self.start();
    }

    /// Pause or resume both engine and timer. Returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        let changed = self.engine.toggle_pause();
        if changed {
            self.sync_pause();
        }
        changed
    }

    /// Stop the timer. The engine state is left as is.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Apply buffered controls, then tick once if the timer says so.
    ///
    /// Returns the tick report when a tick ran.
    pub fn pump(&mut self) -> Option<TickReport> {
        match self.engine.apply_controls() {
            Some(Control::Restarted) => self.scheduler.start(self.engine.tick_period()),
            Some(Control::Paused | Control::Resumed) => self.sync_pause(),
            None => {}
        }

        if !self.scheduler.poll() {
            return None;
        }
        let report = self.engine.tick();

        if report.finished() {
            self.scheduler.stop();
        } else if let Some(level) = report.level_up() {
            let period = self.engine.tick_period();
            debug!(level, ?period, "scheduler restarted");
            self.scheduler.restart(period);
        }
        Some(report)
    }

    fn sync_pause(&mut self) {
        if self.engine.state().is_running() {
            self.scheduler.resume();
        } else if self.scheduler.state() == SchedulerState::Running {
            self.scheduler.pause();
        }
    }
}
