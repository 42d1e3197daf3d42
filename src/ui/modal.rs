use crate::app::AppState;
use crate::domain::UiMode;
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

/// Render the removal confirmation or a notice
pub fn render_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(modal) = &app.modal else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let (title, options) = if app.ui_mode == UiMode::ConfirmRemove {
        (
            " Are you sure? ",
            Line::from(vec![
                Span::styled("[y]", modal_title_style()),
                Span::raw(" Remove  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" Keep"),
            ]),
        )
    } else {
        (
            " Not allowed ",
            Line::from(vec![
                Span::styled("[Enter]", modal_title_style()),
                Span::raw(" OK"),
            ]),
        )
    };

    let lines = vec![
        Line::raw(""),
        Line::raw(modal.message.clone()),
        Line::raw(""),
        options,
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
