use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode::truncate_to_width;

use super::task_row::task_row;

pub const EMPTY_MESSAGE: &str = "No tasks. Enjoy the calm.";
pub const NO_MATCHES_MESSAGE: &str = "Nothing matches the current filter.";

/// Ordered rows of the visible tasks, or an empty-state message.
/// Scrolls to keep the cursor visible unless the edit overlay has locked it.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    if let Some(editor) = &app.editor {
        app.scroll_offset = editor.lock.offset();
    } else if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let search_re = app.search_re();
    let visible = app.visible_tasks();
    if visible.is_empty() {
        let message = if app.store.is_empty() {
            EMPTY_MESSAGE
        } else {
            NO_MATCHES_MESSAGE
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let show_selection = app.focus == Focus::List || app.editor.is_some();
    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, task)| {
            task_row(
                task,
                &app.theme,
                app.today,
                show_selection && i == app.cursor,
                search_re.as_ref(),
            )
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Single-row reminder that a deleted task can be restored
pub fn render_undo_hint(frame: &mut Frame, app: &App, area: Rect) {
    let Some(task) = app.store.last_deleted() else {
        return;
    };
    let bg = app.theme.background;
    let text = format!(
        " Undo delete of \"{}\" (u)",
        truncate_to_width(&task.title, (area.width as usize).saturating_sub(24))
    );
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(app.theme.yellow).bg(bg),
    )))
    .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::view::StatusFilter;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn empty_store_message() {
        let mut app = app_with_titles(&[]);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        insta::assert_snapshot!(output, @"No tasks. Enjoy the calm.");
    }

    #[test]
    fn filtered_out_message() {
        let mut app = app_with_titles(&["open"]);
        app.set_filter(StatusFilter::Done);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_eq!(output, NO_MATCHES_MESSAGE);
    }

    #[test]
    fn rows_follow_view_order() {
        let mut app = app_with_titles(&["first", "second", "third"]);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\u{25B8}[ ] first"));
        assert!(lines[1].starts_with(" [ ] second"));
        assert!(lines[2].starts_with(" [ ] third"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let titles: Vec<String> = (0..10).map(|i| format!("task {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut app = app_with_titles(&refs);
        app.cursor = 7;
        let output = render_to_string(TERM_W, 3, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_eq!(app.scroll_offset, 5);
        assert!(output.contains("task 7"));
        assert!(!output.contains("task 4"));
    }

    #[test]
    fn scroll_is_locked_while_editing() {
        let titles: Vec<String> = (0..10).map(|i| format!("task {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut app = app_with_titles(&refs);
        app.cursor = 2;
        app.scroll_offset = 1;
        app.open_editor();
        app.scroll_offset = 6;
        render_to_string(TERM_W, 3, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert_eq!(app.scroll_offset, 1);
    }
}
