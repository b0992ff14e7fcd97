use std::time::{Duration, Instant};

/// One-shot tick timer, re-armed by the game loop after every tick.
///
/// A late fire runs a single tick and the next deadline is measured from the
/// moment it fired, so ticks missed on a slow frame are skipped, never queued.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    deadline: Option<Instant>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending deadline with `now + interval`.
    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.deadline = Some(now + interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before the next fire, if armed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Brings the timer in line with the game status.
    ///
    /// Stopped while not running. Armed with `interval` when running and no
    /// deadline is pending, which after a fire is the re-arm at the new speed.
    pub fn sync(&mut self, running: bool, now: Instant, interval: Duration) {
        if !running {
            self.cancel();
        } else if !self.is_armed() {
            self.arm(now, interval);
        }
    }
}
