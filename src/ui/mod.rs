pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::format_time;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_modal;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};
use styles::{error_style, hint_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_status_line(f, app, layout.status_area);

    if app.modal.is_some() {
        render_modal(f, app, size);
    }

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

/// Bottom line: last error, else what is running and when we last saved
fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let span = if let Some(message) = app.status() {
        Span::styled(format!(" {}", message), error_style())
    } else {
        let running = match app.store.running_task() {
            Some(task) => format!(
                "Tracking task {} ({})",
                task.id,
                format_time(task.tracker.elapsed_seconds())
            ),
            None => "Nothing running".to_string(),
        };
        let saved = app
            .last_saved
            .map(|t| format!("saved {}", t.format("%H:%M:%S")))
            .unwrap_or_else(|| "not saved yet".to_string());
        Span::styled(format!(" {} · {}", running, saved), hint_style())
    };

    f.render_widget(Paragraph::new(span), area);
}
