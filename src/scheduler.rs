//! Fixed-period tick scheduling over an injectable clock.
//!
//! The scheduler never fires late ticks in a burst: when polled after its
//! deadline it fires once and schedules the next tick one full period from
//! the poll. Pausing drops the pending deadline and resuming starts a fresh
//! interval, so no ticks accumulate across a pause.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// A clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// A clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}

/// Lifecycle of a [`TickScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Never started, or stopped.
    Stopped,
    /// Firing every period.
    Running,
    /// Halted until resumed.
    Paused,
}

/// Decides when the next tick is due.
#[derive(Debug, Clone)]
pub struct TickScheduler<C = SystemClock> {
    clock: C,
    period: Duration,
    next_due: Option<Duration>,
    state: SchedulerState,
    fired: u64,
}

impl<C: Clock> TickScheduler<C> {
    /// A stopped scheduler reading `clock`.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            period: Duration::ZERO,
            next_due: None,
            state: SchedulerState::Stopped,
            fired: 0,
        }
    }

    /// Start firing every `period`, the first tick one period from now.
    ///
    /// Calling this while running restarts the interval with the new period.
    pub fn start(&mut self, period: Duration) {
        self.period = period;
        self.next_due = Some(self.clock.now() + period);
        self.state = SchedulerState::Running;
    }

    /// Start again with a new period. Same as [`TickScheduler::start`].
    pub fn restart(&mut self, period: Duration) {
        self.start(period);
    }

    /// Halt ticks. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state != SchedulerState::Running {
            return false;
        }
        self.state = SchedulerState::Paused;
        self.next_due = None;
        true
    }

    /// Continue after a pause with a fresh interval. Returns whether the
    /// state changed.
    pub fn resume(&mut self) -> bool {
        if self.state != SchedulerState::Paused {
            return false;
        }
        self.start(self.period);
        true
    }

    /// Stop for good. Idempotent.
    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        self.next_due = None;
    }

    /// Whether a tick is due now. A `true` result consumes the tick.
    pub fn poll(&mut self) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        let now = self.clock.now();
        if now < due {
            return false;
        }
        self.next_due = Some(now + self.period);
        self.fired += 1;
        true
    }

    /// Time left before the next tick, `None` unless running.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_sub(self.clock.now()))
    }

    /// Current period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Ticks fired since creation.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }
}
