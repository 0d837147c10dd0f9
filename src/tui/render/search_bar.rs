use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

use super::input_spans;

/// One-row search field plus the active filter and sort
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Search;
    let label_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let mut spans = vec![Span::styled(
        " Search: ",
        Style::default().fg(label_color).bg(bg),
    )];
    if app.search_input.value().is_empty() && !focused {
        spans.push(Span::styled("/", Style::default().fg(app.theme.dim).bg(bg)));
    } else {
        spans.extend(input_spans(
            &app.search_input,
            focused,
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    let mut state = format!("   [{}]", app.criteria.filter.label());
    if app.criteria.sort_by_due {
        state.push_str(" [by due]");
    }
    spans.push(Span::styled(state, Style::default().fg(app.theme.cyan).bg(bg)));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
