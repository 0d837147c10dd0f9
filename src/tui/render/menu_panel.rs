use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, MenuEntry};

const PANEL_WIDTH: u16 = 26;

/// Menu panel anchored to the top-right corner
pub fn render_menu_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = PANEL_WIDTH.min(area.width);
    let height = (MenuEntry::ALL.len() as u16 + 2).min(area.height.saturating_sub(2));
    let panel = Rect::new(
        area.x + area.width - width,
        area.y + 2.min(area.height),
        width,
        height,
    );
    frame.render_widget(Clear, panel);

    let lines: Vec<Line> = MenuEntry::ALL
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let selected = i == app.menu_cursor;
            let current = matches!(entry, MenuEntry::Filter(f) if *f == app.criteria.filter);
            let mut style = Style::default().fg(app.theme.text).bg(bg);
            if selected {
                style = style
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD);
            }
            let marker = if current { "\u{2022}" } else { " " };
            Line::from(Span::styled(
                format!("{} {}", marker, entry.label(&app.criteria)),
                style,
            ))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(" Menu ", Style::default().fg(app.theme.text).bg(bg)))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), panel);
}
