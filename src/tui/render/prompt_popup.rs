use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::{centered_rect_fixed, input_spans};

/// Path prompt for importing a JSON file
pub fn render_prompt_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(input) = &app.import_prompt else {
        return;
    };
    let bg = app.theme.background;
    let width = 60.min(area.width.saturating_sub(2));
    let overlay_area = centered_rect_fixed(width, 5, area);
    frame.render_widget(Clear, overlay_area);

    let mut path_line = vec![Span::styled(" ", Style::default().bg(bg))];
    path_line.extend(input_spans(
        input,
        true,
        Style::default().fg(app.theme.text_bright).bg(bg),
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    let lines = vec![
        Line::from(path_line),
        Line::from(""),
        Line::from(Span::styled(
            " Enter import  Esc cancel",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            " Import JSON file ",
            Style::default().fg(app.theme.text).bg(bg),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
