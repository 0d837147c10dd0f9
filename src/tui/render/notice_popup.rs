use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::{centered_rect_fixed, wrap_text};

/// Modal message box; any key dismisses it
pub fn render_notice_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.notice else {
        return;
    };
    let bg = app.theme.background;
    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let mut lines: Vec<Line> = vec![Line::from("")];
    for s in wrap_text(" ", message, inner_w) {
        lines.push(Line::from(Span::styled(s, text_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    // Dynamic height from content + 2 for borders
    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn long_notice_wraps() {
        let mut app = app_with_titles(&[]);
        app.notice = Some(
            "Failed to read file /a/very/long/path/that/goes/on/todos.json: No such file or directory (os error 2)"
                .into(),
        );
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_notice_popup(frame, &app, area);
        });
        assert!(output.contains("Failed to read file"));
        assert!(output.contains("(os error 2)"));
        assert!(output.contains("Press any key"));
    }
}
