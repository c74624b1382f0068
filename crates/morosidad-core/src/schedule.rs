#![forbid(unsafe_code)]

//! Host-driven time and the cancellable refresh task.
//!
//! Nothing here reads a wall clock. The host advances a
//! [`DeterministicClock`] and polls [`RefreshTask`] with the current
//! monotonic time, which lets tests step thirty seconds in one call.

use core::time::Duration;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Stopped,
    Running { next_due: Duration },
}

/// Fixed-interval task with an explicit start/stop lifecycle.
///
/// Ticks missed while the host was not polling (a throttled background tab)
/// collapse into a single firing; the cadence stays aligned to the start
/// time.
#[derive(Debug, Clone)]
pub struct RefreshTask {
    interval: Duration,
    state: TaskState,
    fired: u64,
}

impl RefreshTask {
    /// `interval` is clamped to at least one millisecond.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            state: TaskState::Stopped,
            fired: 0,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, TaskState::Running { .. })
    }

    /// Total firings since construction.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Arm the task; the first firing is one interval after `now`.
    ///
    /// Returns `false` if it was already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TaskState::Running {
            next_due: now.saturating_add(self.interval),
        };
        true
    }

    /// Disarm the task. Idempotent.
    pub fn stop(&mut self) {
        self.state = TaskState::Stopped;
    }

    /// Time left until the next firing, if running.
    #[must_use]
    pub fn until_next(&self, now: Duration) -> Option<Duration> {
        match self.state {
            TaskState::Stopped => None,
            TaskState::Running { next_due } => Some(next_due.saturating_sub(now)),
        }
    }

    /// Report whether the task is due at `now` and reschedule it.
    pub fn poll(&mut self, now: Duration) -> bool {
        let TaskState::Running { next_due } = self.state else {
            return false;
        };
        if now < next_due {
            return false;
        }
        let interval = self.interval.as_nanos();
        let behind = (now - next_due).as_nanos();
        let skipped = behind / interval;
        let advance = interval.saturating_mul(skipped + 1);
        let advance = Duration::from_nanos(u64::try_from(advance).unwrap_or(u64::MAX));
        self.state = TaskState::Running {
            next_due: next_due.saturating_add(advance),
        };
        self.fired += 1;
        if skipped > 0 {
            tracing::debug!(skipped, "refresh task collapsed missed ticks");
        }
        true
    }
}
