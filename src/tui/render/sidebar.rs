use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::view::StatusFilter;
use crate::tui::app::App;

pub const LEFT_WIDTH: u16 = 18;
pub const RIGHT_WIDTH: u16 = 24;

/// Filter choices with counts, the current one marked
pub fn render_filter_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut lines = vec![
        Line::from(Span::styled(
            " Filters",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, filter) in StatusFilter::ALL.into_iter().enumerate() {
        let count = match filter {
            StatusFilter::All => app.store.len(),
            StatusFilter::Active => app.store.remaining_count(),
            StatusFilter::Done => app.store.done_count(),
        };
        let current = app.criteria.filter == filter;
        let style = if current {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let marker = if current { "\u{25B8}" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{}{} {:<7}{:>3}", marker, i + 1, filter.label(), count),
            style,
        )));
    }

    lines.push(Line::from(""));
    let sort = if app.criteria.sort_by_due {
        " s  by due date"
    } else {
        " s  newest first"
    };
    lines.push(Line::from(Span::styled(
        sort,
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Key reference for the bulk actions
pub fn render_action_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key = Style::default().fg(app.theme.highlight).bg(bg);
    let desc = Style::default().fg(app.theme.text).bg(bg);
    let entry = |k: &'static str, d: &'static str| {
        Line::from(vec![Span::styled(format!(" {:<10}", k), key), Span::styled(d, desc)])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            " Actions",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("A", "Mark all done"),
        entry("C", "Clear done"),
        entry("Ctrl+\u{21E7}E", "Export"),
        entry("Ctrl+\u{21E7}I", "Import"),
        entry("t", "Theme"),
    ];
    if app.store.last_deleted().is_some() {
        lines.push(entry("u", "Undo delete"));
    }

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
