use crate::app::{AppState, EditField};
use crate::domain::UiMode;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.ui_mode {
        mode if mode.is_editing() => handle_input_form_mode(app, key),
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::ConfirmRemove => handle_confirm_mode(app, key),
        UiMode::Notice => handle_notice_mode(app, key),
        _ => false,
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Start/stop the selected task
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),

        // Stop whatever is running
        KeyCode::Char('s') | KeyCode::Char('S') => app.stop_running(),

        KeyCode::Char('a') | KeyCode::Char('A') => app.add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit(EditField::Description),
        KeyCode::Char('t') | KeyCode::Char('T') => app.start_edit(EditField::Time),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_remove_selected(),

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,

        _ => {}
    }
    false
}

/// Handle keys while a text field is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_add_char(c),
        _ => {}
    }
    false
}

/// Handle keys in the removal confirmation
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_remove(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_modal(),
        _ => {}
    }
    false
}

/// Any dismiss key closes a notice
fn handle_notice_mode(app: &mut AppState, key: KeyEvent) -> bool {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.close_modal();
    }
    false
}
