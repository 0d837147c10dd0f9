use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::editor::EditField;

use super::{centered_rect_fixed, input_spans};

/// Expanded editor for the selected task, drawn over the list
pub fn render_edit_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.editor else {
        return;
    };
    let Some(task) = app.store.get(&editor.task_id) else {
        return;
    };

    let bg = app.theme.background;
    let label_style = |field: EditField| {
        if editor.field == field {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        }
    };
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();

    let checkbox = if task.completed { "[x] done" } else { "[ ] open" };
    lines.push(Line::from(vec![
        Span::styled(" Status     ", label_style(EditField::Completed)),
        Span::styled(checkbox, text_style),
    ]));

    let mut row = |label: &'static str, field: EditField| {
        let input = match field {
            EditField::Title => &editor.draft.title,
            EditField::Due => &editor.draft.due,
            _ => &editor.draft.notes,
        };
        let mut spans = vec![Span::styled(label, label_style(field))];
        spans.extend(input_spans(input, editor.field == field, text_style, cursor_style));
        lines.push(Line::from(spans));
    };
    row(" Title      ", EditField::Title);
    row(" Due        ", EditField::Due);
    row(" Notes      ", EditField::Notes);

    lines.push(Line::from(vec![
        Span::styled(" Importance ", label_style(EditField::Importance)),
        Span::styled(
            format!("\u{2039}{}\u{203A}", editor.draft.importance),
            Style::default()
                .fg(app.theme.importance_color(editor.draft.importance))
                .bg(bg),
        ),
    ]));

    lines.push(Line::from(Span::styled(
        format!(" Project    {}", task.project),
        dim,
    )));
    if !task.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" Tags       #{}", task.tags.join(" #")),
            dim,
        )));
    }
    for att in &task.attachments {
        lines.push(Line::from(Span::styled(
            format!(" Attached   {} <{}>", att.name, att.url),
            dim,
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(" Created    {}", task.created_at),
        dim,
    )));

    lines.push(Line::from(""));
    match &editor.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(app.theme.red).bg(bg),
        ))),
        None => lines.push(Line::from(Span::styled(
            " Ctrl+S save  Esc cancel  Ctrl+D delete",
            dim,
        ))),
    }

    let width = 64.min(area.width.saturating_sub(2));
    let height = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(" Edit task ", text_style))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}
