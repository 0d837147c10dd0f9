use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ThemeMode;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Title, counters, and the theme indicator, over a separator line
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(
            " tasklet",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} remaining \u{00B7} {} done",
                app.store.remaining_count(),
                app.store.done_count()
            ),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    ];

    let indicator = match app.theme_mode() {
        ThemeMode::Dark => "\u{263E} dark ",
        ThemeMode::Light => "\u{2600} light ",
    };
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let indicator_w = display_width(indicator);
    if used + indicator_w < width {
        spans.push(Span::styled(
            " ".repeat(width - used - indicator_w),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            indicator,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let separator = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );

    let paragraph = Paragraph::new(vec![Line::from(spans), Line::from(separator)])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
