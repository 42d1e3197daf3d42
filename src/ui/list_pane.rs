use crate::app::AppState;
use crate::domain::{format_time, Task};
use crate::ui::styles::{
    border_style, default_style, running_style, selected_style, stopped_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use std::time::Instant;

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = Instant::now();

    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, task.tracker.elapsed_seconds_at(now));
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        " Tasks ({}/{}) · Total {} ",
        app.store.len(),
        app.store.max_tasks(),
        format_time(app.store.total_seconds_at(now))
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: " 2. Write proposal      01:12:09 "
fn create_task_line(task: &Task, elapsed_seconds: u64) -> Line<'static> {
    let description = if task.description.is_empty() {
        "(no description)".to_string()
    } else {
        task.description.clone()
    };

    let time_style = if task.is_running() {
        running_style()
    } else {
        stopped_style()
    };

    Line::from(vec![
        Span::raw(format!("{:>2}. ", task.id.0)),
        Span::raw(format!("{:<40}", description)),
        Span::styled(format!(" {} ", format_time(elapsed_seconds)), time_style),
    ])
}
