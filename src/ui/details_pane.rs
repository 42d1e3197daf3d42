use crate::app::AppState;
use crate::domain::format_time;
use crate::ui::styles::{border_style, default_style, running_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_id().and_then(|id| app.store.get(id)) else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Task:    ", title_style()),
        Span::raw(task.id.to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("About:   ", title_style()),
        Span::raw(task.description.clone()),
    ]));
    lines.push(Line::raw(""));

    let elapsed_style = if task.is_running() {
        running_style()
    } else {
        default_style()
    };
    lines.push(Line::from(vec![
        Span::styled("Elapsed: ", title_style()),
        Span::styled(format_time(task.tracker.elapsed_seconds()), elapsed_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Status:  ", title_style()),
        Span::raw(task.tracker.state().to_tag()),
    ]));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
