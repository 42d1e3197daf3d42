use crate::app::{AppState, EditField};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the single-field editor for a task's description or time
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let (title_text, hint) = match form.field {
            EditField::Description => (format!(" Task {} description ", form.task_id), "Free text"),
            EditField::Time => (
                format!(" Task {} time ", form.task_id),
                "hh:mm:ss, mm:ss or seconds",
            ),
        };

        let lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(form.buffer.clone(), modal_title_style()),
                Span::styled("█", modal_title_style()), // Cursor
            ]),
            Line::raw(""),
            Line::raw(hint),
            Line::raw(""),
            Line::raw("Enter to save  ·  Esc to cancel"),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
