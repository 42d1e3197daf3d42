use crate::domain::TaskId;
use std::path::PathBuf;
use thiserror::Error;

/// Contract violations on a single tracker. The tracker is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("tracker is already running")]
    AlreadyRunning,
    #[error("tracker is not running")]
    NotRunning,
    #[error("cannot overwrite the time of a running tracker")]
    EditWhileRunning,
}

/// Failures reading or writing the task file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed task file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the task store and the time text codec
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid time format: {0:?}")]
    InvalidFormat(String),
    #[error("too many tasks (limit is {max})")]
    TooManyTasks { max: usize },
    #[error("no task with id {0}")]
    NotFound(TaskId),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, TaskError>;
