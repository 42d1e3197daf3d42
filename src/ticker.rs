use std::time::{Duration, Instant};

/// Default poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Turns wall time into whole-second ticks; the sub-second remainder carries over
#[derive(Debug, Clone)]
pub struct SecondClock {
    last: Instant,
}

impl SecondClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Realign with a tracker that just started
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    /// Whole seconds since the previous call
    pub fn take_whole_seconds(&mut self, now: Instant) -> u64 {
        let secs = now.saturating_duration_since(self.last).as_secs();
        self.last += Duration::from_secs(secs);
        secs
    }
}

/// Fixed-period timer polled from the event loop
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    last: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, last: now }
    }

    /// True once per elapsed period
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }
}
