use crate::config::Config;
use crate::domain::{editable_time, parse_time, TaskId, TaskListStore, UiMode};
use crate::error::{PersistenceError, TaskError};
use crate::persistence::save_snapshot;
use crate::ticker::{Interval, SecondClock};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::error;

/// How long a status message stays on screen
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Which task field the input form edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Description,
    Time,
}

/// Input form state for editing a task in place
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub task_id: TaskId,
    pub field: EditField,
    pub buffer: String,
}

/// Modal state for confirmations and notices
#[derive(Debug, Clone)]
pub struct ModalState {
    /// Task awaiting removal, for the confirmation modal
    pub task_id: Option<TaskId>,
    pub message: String,
}

/// One-line feedback shown under the list until it expires or the next action succeeds
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    shown_at: Instant,
}

/// Main application state
pub struct AppState {
    pub store: TaskListStore,
    pub data_path: PathBuf,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub modal: Option<ModalState>,
    pub input_form: Option<InputFormState>,
    status: Option<StatusMessage>,
    pub needs_save: bool,
    pub last_saved: Option<DateTime<Local>>,
    second_clock: SecondClock,
    autosave: Interval,
}

impl AppState {
    pub fn new(store: TaskListStore, data_path: PathBuf, config: &Config) -> Self {
        let now = Instant::now();
        Self {
            store,
            data_path,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            modal: None,
            input_form: None,
            status: None,
            needs_save: false,
            last_saved: None,
            second_clock: SecondClock::new(now),
            autosave: Interval::new(Duration::from_secs(config.autosave_secs.max(1)), now),
        }
    }

    /// Current status line message, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.set_status_at(text, Instant::now());
    }

    fn set_status_at(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.into(),
            shown_at: now,
        });
    }

    /// Id of the highlighted task
    pub fn selected_id(&self) -> Option<TaskId> {
        self.store.tasks().get(self.selected_index).map(|t| t.id)
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        if self.store.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.store.len() {
            self.selected_index = self.store.len() - 1;
        }
    }

    /// Append an empty task and open its description editor
    pub fn add_task(&mut self) {
        match self.store.add_task(String::new(), 0) {
            Ok(id) => {
                self.selected_index = id.index();
                self.status = None;
                self.needs_save = true;
                self.start_edit(EditField::Description);
            }
            Err(TaskError::TooManyTasks { max }) => {
                self.modal = Some(ModalState {
                    task_id: None,
                    message: format!("Too many tasks! The limit is {}.", max),
                });
                self.ui_mode = UiMode::Notice;
            }
            Err(e) => self.report_contract_failure(e),
        }
    }

    /// Toggle the selected task's timer
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.toggle_task(id);
        }
    }

    /// Stop `id` if it is the running task, otherwise make it the running task
    pub fn toggle_task(&mut self, id: TaskId) {
        if self.store.running_id() == Some(id) {
            self.stop_running();
            return;
        }

        let now = Instant::now();
        match self.store.set_running_at(id, now) {
            Ok(()) => {
                self.second_clock.reset(now);
                self.status = None;
                self.needs_save = true;
            }
            Err(e) => self.report_contract_failure(e),
        }
    }

    /// Stop whatever is running
    pub fn stop_running(&mut self) {
        if self.store.stop_running().is_some() {
            self.status = None;
            self.needs_save = true;
        }
    }

    /// Ask before removing the selected task
    pub fn request_remove_selected(&mut self) {
        if let Some(task) = self.selected_id().and_then(|id| self.store.get(id)) {
            self.modal = Some(ModalState {
                task_id: Some(task.id),
                message: format!("Remove task '{}'?", task.description),
            });
            self.ui_mode = UiMode::ConfirmRemove;
        }
    }

    /// Remove the task named by the confirmation modal
    pub fn confirm_remove(&mut self) {
        if let Some(id) = self.modal.take().and_then(|m| m.task_id) {
            match self.store.remove_task(id) {
                Ok(_) => {
                    self.clamp_selection();
                    self.status = None;
                    self.needs_save = true;
                }
                Err(e) => self.report_contract_failure(e),
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    /// Dismiss any modal
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Open the input form on the selected task with its current value
    pub fn start_edit(&mut self, field: EditField) {
        let Some(task) = self.selected_id().and_then(|id| self.store.get(id)) else {
            return;
        };

        let buffer = match field {
            EditField::Description => task.description.clone(),
            EditField::Time => editable_time(task.tracker.elapsed_seconds()),
        };

        self.input_form = Some(InputFormState {
            task_id: task.id,
            field,
            buffer,
        });
        self.ui_mode = match field {
            EditField::Description => UiMode::EditingDescription,
            EditField::Time => UiMode::EditingTime,
        };
    }

    /// Add character to the input form
    pub fn input_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.buffer.push(c);
        }
    }

    /// Backspace in the input form
    pub fn input_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.buffer.pop();
        }
    }

    /// Apply the input form to its task.
    ///
    /// Unparseable time text leaves the task untouched; the next render shows
    /// the previous value again.
    pub fn submit_input(&mut self) {
        self.submit_input_at(Instant::now());
    }

    pub fn submit_input_at(&mut self, now: Instant) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        let result = match form.field {
            EditField::Description => self.store.set_description(form.task_id, form.buffer.trim()),
            EditField::Time => parse_time(&form.buffer).and_then(|secs| self.set_time_at(form.task_id, secs, now)),
        };

        match result {
            Ok(()) => {
                self.status = None;
                self.needs_save = true;
            }
            Err(TaskError::InvalidFormat(text)) => {
                self.set_status_at(format!("Invalid time '{}': use hh:mm:ss, mm:ss or seconds", text), now);
            }
            Err(e) => self.report_contract_failure(e),
        }
    }

    /// Overwrite a task's time. Editing the running task restarts its live
    /// span at `now`, so the second clock restarts with it.
    fn set_time_at(&mut self, id: TaskId, seconds: u64, now: Instant) -> crate::error::Result<()> {
        self.store.set_time_at(id, seconds, now)?;
        if self.store.running_id() == Some(id) {
            self.second_clock.reset(now);
        }
        Ok(())
    }

    /// Cancel the input form
    pub fn cancel_input(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Credit whole elapsed seconds to the running task
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let seconds = self.second_clock.take_whole_seconds(now);
        if seconds > 0 {
            self.store.tick(seconds);
        }

        let expired = self
            .status
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.shown_at) >= STATUS_TTL);
        if expired {
            self.status = None;
        }
    }

    /// Save when the autosave period has passed and there is something to save
    pub fn autosave(&mut self) -> Result<(), PersistenceError> {
        self.autosave_at(Instant::now())
    }

    pub fn autosave_at(&mut self, now: Instant) -> Result<(), PersistenceError> {
        let tracking = self.store.running_id().is_some();
        if self.autosave.is_due(now) && (self.needs_save || tracking) {
            self.save()?;
        }
        Ok(())
    }

    /// Write the task file
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        save_snapshot(&self.data_path, &self.store.export_snapshot())?;
        self.needs_save = false;
        self.last_saved = Some(Local::now());
        Ok(())
    }

    /// Stop tracking and make a final save
    pub fn shutdown(&mut self) -> Result<(), PersistenceError> {
        if self.store.stop_running().is_some() {
            self.needs_save = true;
        }
        self.save()
    }

    /// An id from the UI did not match the store; log and carry on
    fn report_contract_failure(&mut self, err: TaskError) {
        error!(error = %err, "UI referenced state the store does not have");
        self.set_status(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tracker::TrackerState;
    use crate::persistence::snapshot::load_snapshot;
    use tempfile::TempDir;

    fn create_test_app() -> (AppState, TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = TaskListStore::default();
        store.add_task("Task 1", 0).unwrap();
        store.add_task("Task 2", 90).unwrap();
        let app = AppState::new(store, temp_dir.path().join("TaskData.json"), &Config::default());
        (app, temp_dir)
    }

    #[test]
    fn test_app_state_new() {
        let (app, _dir) = create_test_app();
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_move_selection() {
        let (mut app, _dir) = create_test_app();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_add_task_opens_description_editor() {
        let (mut app, _dir) = create_test_app();
        app.add_task();

        assert_eq!(app.store.len(), 3);
        assert_eq!(app.selected_id(), Some(TaskId(3)));
        assert_eq!(app.ui_mode, UiMode::EditingDescription);

        for c in "Review PR".chars() {
            app.input_add_char(c);
        }
        app.submit_input();

        assert_eq!(app.store.get(TaskId(3)).unwrap().description, "Review PR");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.needs_save);
    }

    #[test]
    fn test_add_task_when_full_shows_notice() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            max_tasks: 1,
            ..Config::default()
        };
        let mut app = AppState::new(
            TaskListStore::new(config.max_tasks),
            temp_dir.path().join("TaskData.json"),
            &config,
        );

        app.add_task();
        app.cancel_input();
        app.add_task();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.ui_mode, UiMode::Notice);
        assert!(app.modal.as_ref().unwrap().message.starts_with("Too many tasks!"));

        app.close_modal();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_toggle_switches_and_stops() {
        let (mut app, _dir) = create_test_app();

        app.toggle_selected();
        assert_eq!(app.store.running_id(), Some(TaskId(1)));

        app.move_selection_down();
        app.toggle_selected();
        assert_eq!(app.store.running_id(), Some(TaskId(2)));
        assert_eq!(app.store.get(TaskId(1)).unwrap().tracker.state(), TrackerState::Stopped);

        app.toggle_selected();
        assert_eq!(app.store.running_id(), None);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let (mut app, _dir) = create_test_app();
        app.move_selection_down();

        app.request_remove_selected();
        assert_eq!(app.ui_mode, UiMode::ConfirmRemove);
        assert_eq!(app.modal.as_ref().unwrap().message, "Remove task 'Task 2'?");

        app.close_modal();
        assert_eq!(app.store.len(), 2);

        app.request_remove_selected();
        app.confirm_remove();
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_edit_time() {
        let (mut app, _dir) = create_test_app();
        app.start_edit(EditField::Time);
        assert_eq!(app.input_form.as_ref().unwrap().buffer, "00:00:00");

        app.input_form.as_mut().unwrap().buffer = "01:30:00".to_string();
        app.submit_input();

        assert_eq!(app.store.get(TaskId(1)).unwrap().tracker.accumulated_seconds(), 5400);
        assert!(app.status().is_none());
    }

    #[test]
    fn test_invalid_time_keeps_previous_value() {
        let (mut app, _dir) = create_test_app();
        app.move_selection_down();
        app.start_edit(EditField::Time);

        app.input_form.as_mut().unwrap().buffer = "24:00:00".to_string();
        app.submit_input();

        assert_eq!(app.store.get(TaskId(2)).unwrap().tracker.accumulated_seconds(), 90);
        assert!(app.status().unwrap().starts_with("Invalid time"));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_tick_credits_running_task() {
        let (mut app, _dir) = create_test_app();
        app.toggle_selected();

        let later = Instant::now() + Duration::from_secs(3);
        app.tick_at(later);

        assert!(app.store.get(TaskId(1)).unwrap().tracker.accumulated_seconds() >= 3);
        assert_eq!(app.store.get(TaskId(2)).unwrap().tracker.accumulated_seconds(), 90);
    }

    #[test]
    fn test_autosave_only_when_dirty_or_tracking() {
        let (mut app, _dir) = create_test_app();
        let later = Instant::now() + Duration::from_secs(6);

        app.autosave_at(later).unwrap();
        assert!(!app.data_path.exists());

        app.needs_save = true;
        app.autosave_at(later + Duration::from_secs(6)).unwrap();
        assert!(app.data_path.exists());
        assert!(!app.needs_save);
        assert!(app.last_saved.is_some());
    }

    #[test]
    fn test_shutdown_stops_and_saves() {
        let (mut app, _dir) = create_test_app();
        app.toggle_selected();

        app.shutdown().unwrap();

        assert_eq!(app.store.running_id(), None);
        let saved = load_snapshot(&app.data_path).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].total_seconds, 90);
    }

    #[test]
    fn test_editing_running_time_realigns_second_clock() {
        let (mut app, _dir) = create_test_app();
        let t0 = Instant::now();
        app.store.set_running_at(TaskId(1), t0).unwrap();
        app.second_clock.reset(t0);
        app.tick_at(t0 + Duration::from_millis(1600));

        app.start_edit(EditField::Time);
        app.input_form.as_mut().unwrap().buffer = "00:10:00".to_string();
        app.submit_input_at(t0 + Duration::from_millis(1600));

        // Under a second of real time passes after the edit
        app.tick_at(t0 + Duration::from_millis(2000));
        app.store.stop_running_at(t0 + Duration::from_millis(2500));

        assert_eq!(app.store.get(TaskId(1)).unwrap().tracker.accumulated_seconds(), 600);
    }

    #[test]
    fn test_edit_time_over_a_day_resubmits_unchanged() {
        let (mut app, _dir) = create_test_app();
        app.store.set_time(TaskId(1), 90061).unwrap();

        app.start_edit(EditField::Time);
        assert_eq!(app.input_form.as_ref().unwrap().buffer, "90061");
        app.submit_input();

        assert_eq!(app.store.get(TaskId(1)).unwrap().tracker.accumulated_seconds(), 90061);
        assert!(app.status().is_none());
    }

    #[test]
    fn test_status_clears_on_next_action() {
        let (mut app, _dir) = create_test_app();
        app.start_edit(EditField::Time);
        app.input_form.as_mut().unwrap().buffer = "garbage".to_string();
        app.submit_input();
        assert!(app.status().is_some());

        app.toggle_selected();
        assert!(app.status().is_none());
    }

    #[test]
    fn test_status_expires() {
        let (mut app, _dir) = create_test_app();
        app.set_status("Autosave failed: disk full");

        app.tick_at(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.status(), Some("Autosave failed: disk full"));

        app.tick_at(Instant::now() + STATUS_TTL + Duration::from_secs(1));
        assert!(app.status().is_none());
    }
}
