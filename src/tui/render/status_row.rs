use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode::{display_width, truncate_to_width};

fn key_hints(app: &App) -> &'static str {
    if app.editor.is_some() {
        return "Tab next field  Ctrl+S save  Esc cancel";
    }
    if app.menu_open {
        return "j/k move  Enter run  Esc close";
    }
    match app.focus {
        Focus::List => "Space toggle  e edit  d delete  / search  a add",
        Focus::Form => "Tab next field  Enter add  Esc back",
        Focus::Search => "Enter keep  Esc clear",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", truncate_to_width(msg, width.saturating_sub(1))),
            Style::default().fg(app.theme.green).bg(bg),
        ));
    } else if app.show_key_hints {
        let hints = format!(" {}", key_hints(app));
        let help = "? help ";
        let used = display_width(&hints);
        if used + display_width(help) < width {
            spans.push(Span::styled(hints, Style::default().fg(app.theme.dim).bg(bg)));
            spans.push(Span::styled(
                " ".repeat(width - used - display_width(help)),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(help, Style::default().fg(app.theme.dim).bg(bg)));
        } else {
            spans.push(Span::styled(
                truncate_to_width(&hints, width),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
