pub mod enums;
pub mod store;
pub mod task;
pub mod time_text;
pub mod tracker;

pub use enums::UiMode;
pub use store::{SnapshotRecord, TaskListStore, DEFAULT_MAX_TASKS};
pub use task::{Task, TaskId};
pub use time_text::{editable_time, format_time, parse_time};
