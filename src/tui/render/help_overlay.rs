use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect_fixed;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "List",
        &[
            ("\u{2191}\u{2193}/jk", "Move cursor"),
            ("Space", "Toggle done"),
            ("Enter/e", "Edit task"),
            ("d/Del", "Delete task"),
            ("u", "Undo delete"),
            ("1/2/3, f", "Filter all/active/done"),
            ("s", "Sort by due date"),
            ("/", "Search titles"),
            ("a/Tab", "New task form"),
            ("A / C", "Mark all done / clear done"),
            ("t", "Toggle theme"),
            ("m", "Menu"),
        ],
    ),
    (
        "Editing",
        &[
            ("Tab/\u{21E7}Tab", "Next/previous field"),
            ("\u{2190}\u{2192}", "Change importance"),
            ("Ctrl+S", "Save (also Ctrl+Enter)"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Anywhere",
        &[
            ("Ctrl+K", "Focus new task title"),
            ("Ctrl+\u{21E7}E", "Export to JSON"),
            ("Ctrl+\u{21E7}I", "Import from JSON"),
            ("?", "Toggle this help"),
            ("q / Ctrl+Q", "Quit"),
        ],
    ),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(format!(" {}", title), header_style)));
        for (key, desc) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<14}", key), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.pop();

    let width = 52.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(" Key Bindings ", header_style))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_lists_shortcuts() {
        let mut app = app_with_titles(&[]);
        app.show_help = true;
        let output = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Ctrl+K"));
        assert!(output.contains("Undo delete"));
    }
}
