use chrono::NaiveDate;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;

use crate::model::{Recurrence, Task};
use crate::ops::view::{DueStatus, due_status};
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;

use super::push_highlighted_spans;

/// Longest notes excerpt shown in a row
const NOTES_PREVIEW: usize = 24;

/// Compact one-line view of a task: checkbox, title, badges
pub fn task_row<'a>(
    task: &Task,
    theme: &Theme,
    today: NaiveDate,
    selected: bool,
    search_re: Option<&Regex>,
) -> Line<'a> {
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let status = due_status(task, today);

    let title_color = if task.completed {
        theme.dim
    } else if status == DueStatus::Overdue {
        theme.red
    } else if selected {
        theme.text_bright
    } else {
        theme.text
    };
    let mut title_style = Style::default().fg(title_color).bg(bg);
    if task.completed {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let dim = Style::default().fg(theme.dim).bg(bg);

    let marker = if selected { "\u{25B8}" } else { " " };
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(checkbox, Style::default().fg(theme.text).bg(bg)),
    ];
    push_highlighted_spans(&mut spans, &task.title, title_style, match_style, search_re);

    spans.push(Span::styled(
        format!("  !{}", task.importance),
        Style::default()
            .fg(theme.importance_color(task.importance))
            .bg(bg),
    ));

    if let Some(due) = task.due_date {
        let (text, color) = match status {
            DueStatus::Overdue => (format!("  due {} (overdue)", due), theme.red),
            DueStatus::Today => (format!("  due {} (today)", due), theme.yellow),
            DueStatus::Future => (format!("  due {}", due), theme.text),
        };
        spans.push(Span::styled(text, Style::default().fg(color).bg(bg)));
    }

    spans.push(Span::styled(format!("  @{}", task.project), dim));

    if task.recurrence != Recurrence::None {
        spans.push(Span::styled(
            format!("  \u{21BB}{}", task.recurrence.as_str()),
            Style::default().fg(theme.purple).bg(bg),
        ));
    }

    for tag in &task.tags {
        spans.push(Span::styled(
            format!("  #{}", tag),
            Style::default().fg(theme.tag_color(tag)).bg(bg),
        ));
    }

    if let Some(first) = task.notes.lines().find(|l| !l.trim().is_empty()) {
        spans.push(Span::styled(
            format!("  \u{2014} {}", truncate_to_width(first.trim(), NOTES_PREVIEW)),
            dim,
        ));
    }

    if !task.attachments.is_empty() {
        spans.push(Span::styled(format!("  +{} att", task.attachments.len()), dim));
    }

    Line::from(spans).style(Style::default().bg(bg))
}
