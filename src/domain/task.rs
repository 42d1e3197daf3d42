use super::tracker::TimeTracker;
use std::fmt;

/// 1-based position of a task in the list. Kept contiguous on removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u32);

impl TaskId {
    /// Id for a zero-based list index
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    pub fn index(&self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-named unit of work and its tracker
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub tracker: TimeTracker,
}

impl Task {
    pub fn new(id: TaskId, description: String, initial_seconds: u64) -> Self {
        Self {
            id,
            description,
            tracker: TimeTracker::new(initial_seconds),
        }
    }

    pub fn is_running(&self) -> bool {
        self.tracker.is_running()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {} | {}", self.id, self.description)
    }
}
