use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::form::FormField;

use super::input_spans;

/// Rows taken by the creation form, borders included
pub const FORM_HEIGHT: u16 = 4;

/// The new-task form: title on the first row, importance, due and notes on the second
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Form;
    let form = &app.form;

    let label = |field: FormField| {
        let active = focused && form.field == field;
        let style = Style::default().bg(bg);
        if active {
            Span::styled(
                format!(" {} ", field.label()),
                style.fg(app.theme.highlight).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", field.label()), style.fg(app.theme.dim))
        }
    };
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let active = |field: FormField| focused && form.field == field;

    let mut title_line = vec![label(FormField::Title)];
    if form.title.value().is_empty() && !active(FormField::Title) {
        title_line.push(Span::styled(
            "What needs doing?",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        title_line.extend(input_spans(
            &form.title,
            active(FormField::Title),
            text_style,
            cursor_style,
        ));
    }

    let mut detail_line = vec![label(FormField::Importance)];
    detail_line.push(Span::styled(
        format!("\u{2039}{}\u{203A}", form.importance),
        Style::default()
            .fg(app.theme.importance_color(form.importance))
            .bg(bg),
    ));
    detail_line.push(Span::styled("  ", Style::default().bg(bg)));
    detail_line.push(label(FormField::Due));
    if form.due.value().is_empty() && !active(FormField::Due) {
        detail_line.push(Span::styled(
            "YYYY-MM-DD",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        detail_line.extend(input_spans(
            &form.due,
            active(FormField::Due),
            text_style,
            cursor_style,
        ));
    }
    detail_line.push(Span::styled("  ", Style::default().bg(bg)));
    detail_line.push(label(FormField::Notes));
    detail_line.extend(input_spans(
        &form.notes,
        active(FormField::Notes),
        text_style,
        cursor_style,
    ));

    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(
            " New task ",
            Style::default().fg(app.theme.text).bg(bg),
        ))
        .style(Style::default().bg(bg));
    if let Some(err) = &form.error {
        block = block.title_bottom(Span::styled(
            format!(" {} ", err),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(title_line), Line::from(detail_line)])
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
