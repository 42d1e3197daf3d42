use crate::error::TrackerError;
use std::time::{Duration, Instant};

/// Whether a tracker is currently accumulating time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Stopped,
    Running,
}

impl TrackerState {
    /// Short badge shown next to a task
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Stopped => "STOPPED",
            Self::Running => "RUNNING",
        }
    }
}

/// Accumulated time for a single task.
///
/// `elapsed = accumulated + (now - running_since)` while running. Periodic
/// ticks move whole seconds from the live span into `accumulated` by
/// advancing the baseline, so ticking and stopping never count a second twice.
#[derive(Debug, Clone, Default)]
pub struct TimeTracker {
    accumulated_seconds: u64,
    /// When the live span started (not persisted)
    running_since: Option<Instant>,
}

impl TimeTracker {
    pub fn new(initial_seconds: u64) -> Self {
        Self {
            accumulated_seconds: initial_seconds,
            running_since: None,
        }
    }

    pub fn state(&self) -> TrackerState {
        if self.running_since.is_some() {
            TrackerState::Running
        } else {
            TrackerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Seconds banked so far, excluding the live span
    pub fn accumulated_seconds(&self) -> u64 {
        self.accumulated_seconds
    }

    /// Start the timer
    pub fn start_at(&mut self, now: Instant) -> Result<(), TrackerError> {
        if self.running_since.is_some() {
            return Err(TrackerError::AlreadyRunning);
        }
        self.running_since = Some(now);
        Ok(())
    }

    /// Stop the timer and bank the whole seconds of the live span
    pub fn stop_at(&mut self, now: Instant) -> Result<(), TrackerError> {
        let started = self.running_since.take().ok_or(TrackerError::NotRunning)?;
        let live = now.saturating_duration_since(started).as_secs();
        self.accumulated_seconds = self.accumulated_seconds.saturating_add(live);
        Ok(())
    }

    /// Add (or, for corrections, subtract) seconds directly. Never goes below zero.
    pub fn add_seconds(&mut self, seconds: i64) {
        self.accumulated_seconds = if seconds >= 0 {
            self.accumulated_seconds.saturating_add(seconds.unsigned_abs())
        } else {
            self.accumulated_seconds.saturating_sub(seconds.unsigned_abs())
        };
    }

    /// Credit `seconds` from the periodic timer.
    ///
    /// While running the baseline moves forward by the same amount, so the
    /// credited seconds are not counted again on `stop`.
    pub fn tick(&mut self, seconds: u64) {
        self.add_seconds(i64::try_from(seconds).unwrap_or(i64::MAX));
        if let Some(since) = self.running_since {
            let advanced = since
                .checked_add(Duration::from_secs(seconds))
                .unwrap_or(since);
            self.running_since = Some(advanced);
        }
    }

    /// Overwrite the banked time with a user-supplied value
    pub fn set_absolute(&mut self, seconds: u64) -> Result<(), TrackerError> {
        if self.running_since.is_some() {
            return Err(TrackerError::EditWhileRunning);
        }
        self.accumulated_seconds = seconds;
        Ok(())
    }

    /// Total seconds including the live span
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds_at(Instant::now())
    }

    pub fn elapsed_seconds_at(&self, now: Instant) -> u64 {
        let live = self
            .running_since
            .map(|since| now.saturating_duration_since(since).as_secs())
            .unwrap_or(0);
        self.accumulated_seconds.saturating_add(live)
    }
}
