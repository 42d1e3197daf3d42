use super::task::{Task, TaskId};
use crate::error::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Default cap on the number of tasks in the list
pub const DEFAULT_MAX_TASKS: usize = 15;

/// One persisted task: description and total time. The id is implied by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(rename = "TaskDescription")]
    pub description: String,
    #[serde(rename = "TimeSpentInSeconds")]
    pub total_seconds: u64,
}

/// Ordered task list with at most one running task.
///
/// Ids are always `1..=len` in list order. All mutation goes through these
/// methods so the running pointer and the trackers never disagree.
#[derive(Debug, Clone)]
pub struct TaskListStore {
    tasks: Vec<Task>,
    running: Option<TaskId>,
    max_tasks: usize,
}

impl Default for TaskListStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TASKS)
    }
}

impl TaskListStore {
    pub fn new(max_tasks: usize) -> Self {
        Self {
            tasks: Vec::new(),
            running: None,
            max_tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn max_tasks(&self) -> usize {
        self.max_tasks
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= self.max_tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index()).filter(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .get_mut(id.index())
            .filter(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    pub fn running_id(&self) -> Option<TaskId> {
        self.running
    }

    pub fn running_task(&self) -> Option<&Task> {
        self.running.and_then(|id| self.get(id))
    }

    /// Append a stopped task with the next id
    pub fn add_task(&mut self, description: impl Into<String>, initial_seconds: u64) -> Result<TaskId> {
        if self.is_full() {
            return Err(TaskError::TooManyTasks { max: self.max_tasks });
        }
        let id = TaskId::from_index(self.tasks.len());
        self.tasks.push(Task::new(id, description.into(), initial_seconds));
        info!(task = %id, "task added");
        Ok(id)
    }

    /// Remove a task and shift every later id down by one
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task> {
        if self.get(id).is_none() {
            return Err(TaskError::NotFound(id));
        }

        let removed = self.tasks.remove(id.index());
        for (index, task) in self.tasks.iter_mut().enumerate().skip(id.index()) {
            task.id = TaskId::from_index(index);
        }

        self.running = match self.running {
            Some(running) if running == id => None,
            Some(running) if running > id => Some(TaskId(running.0 - 1)),
            other => other,
        };

        info!(task = %id, description = %removed.description, "task removed");
        Ok(removed)
    }

    pub fn set_description(&mut self, id: TaskId, description: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.description = description.into();
        Ok(())
    }

    /// Make `id` the single running task, banking time on the previous one
    pub fn set_running_at(&mut self, id: TaskId, now: Instant) -> Result<()> {
        if self.get(id).is_none() {
            return Err(TaskError::NotFound(id));
        }
        self.stop_running_at(now);
        self.get_mut(id)?.tracker.start_at(now)?;
        self.running = Some(id);
        info!(task = %id, "tracking started");
        Ok(())
    }

    /// Stop the running task, if any. Returns the id that was stopped.
    pub fn stop_running(&mut self) -> Option<TaskId> {
        self.stop_running_at(Instant::now())
    }

    pub fn stop_running_at(&mut self, now: Instant) -> Option<TaskId> {
        let id = self.running.take()?;
        if let Some(task) = self.tasks.get_mut(id.index()) {
            // The pointer only ever names a running tracker
            let _ = task.tracker.stop_at(now);
            info!(task = %id, seconds = task.tracker.accumulated_seconds(), "tracking stopped");
        }
        Some(id)
    }

    /// Credit whole seconds to the running task. No-op when nothing runs.
    pub fn tick(&mut self, seconds: u64) {
        if let Some(id) = self.running {
            if let Some(task) = self.tasks.get_mut(id.index()) {
                task.tracker.tick(seconds);
            }
        }
    }

    /// Overwrite a task's time from the edit path.
    ///
    /// A running task is stopped, corrected and restarted so the tracker
    /// itself is only ever edited while stopped.
    pub fn set_time(&mut self, id: TaskId, seconds: u64) -> Result<()> {
        self.set_time_at(id, seconds, Instant::now())
    }

    pub fn set_time_at(&mut self, id: TaskId, seconds: u64, now: Instant) -> Result<()> {
        let was_running = self.running == Some(id);
        let task = self.get_mut(id)?;
        if was_running {
            task.tracker.stop_at(now)?;
        }
        task.tracker.set_absolute(seconds)?;
        if was_running {
            task.tracker.start_at(now)?;
        }
        debug!(task = %id, seconds, "time corrected");
        Ok(())
    }

    /// Sum of every task's elapsed time
    pub fn total_seconds_at(&self, now: Instant) -> u64 {
        self.tasks
            .iter()
            .map(|t| t.tracker.elapsed_seconds_at(now))
            .sum()
    }

    pub fn export_snapshot(&self) -> Vec<SnapshotRecord> {
        self.export_snapshot_at(Instant::now())
    }

    pub fn export_snapshot_at(&self, now: Instant) -> Vec<SnapshotRecord> {
        self.tasks
            .iter()
            .map(|t| SnapshotRecord {
                description: t.description.clone(),
                total_seconds: t.tracker.elapsed_seconds_at(now),
            })
            .collect()
    }

    /// Build a fresh store with every tracker stopped.
    ///
    /// Records beyond `max_tasks` are kept; the cap only blocks further adds.
    pub fn import_snapshot(records: Vec<SnapshotRecord>, max_tasks: usize) -> Self {
        let tasks = records
            .into_iter()
            .enumerate()
            .map(|(index, r)| Task::new(TaskId::from_index(index), r.description, r.total_seconds))
            .collect();
        Self {
            tasks,
            running: None,
            max_tasks,
        }
    }
}
