pub mod edit_overlay;
pub mod form;
pub mod header;
pub mod help_overlay;
pub mod menu_panel;
pub mod notice_popup;
pub mod prompt_popup;
pub mod search_bar;
pub mod sidebar;
pub mod status_row;
pub mod task_list;
pub mod task_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;
use crate::util::text_input::TextInput;

/// Terminals at least this wide get the filter and action sidebars
pub const SIDEBAR_MIN_WIDTH: u16 = 100;

/// Draw the whole screen, overlays last
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | body | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    let center = if area.width >= SIDEBAR_MIN_WIDTH {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(sidebar::LEFT_WIDTH),
                Constraint::Min(20),
                Constraint::Length(sidebar::RIGHT_WIDTH),
            ])
            .split(chunks[1]);
        sidebar::render_filter_sidebar(frame, app, cols[0]);
        sidebar::render_action_sidebar(frame, app, cols[2]);
        cols[1]
    } else {
        chunks[1]
    };

    // Center column: form | search bar | list | undo hint
    let undo_rows = u16::from(app.store.last_deleted().is_some());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form::FORM_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(undo_rows),
        ])
        .split(center);

    form::render_form(frame, app, rows[0]);
    search_bar::render_search_bar(frame, app, rows[1]);
    task_list::render_task_list(frame, app, rows[2]);
    if undo_rows > 0 {
        task_list::render_undo_hint(frame, app, rows[3]);
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays, bottom to top
    if app.menu_open {
        menu_panel::render_menu_panel(frame, app, area);
    }
    if app.editor.is_some() {
        edit_overlay::render_edit_overlay(frame, app, area);
    }
    if app.import_prompt.is_some() {
        prompt_popup::render_prompt_popup(frame, app, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
    if app.notice.is_some() {
        notice_popup::render_notice_popup(frame, app, area);
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(text[last_end..m.start()].to_string(), base_style));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Spans for a text field, with a block cursor at the insertion point when focused
pub(super) fn input_spans(
    input: &TextInput,
    focused: bool,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    if !focused {
        return vec![Span::styled(input.value().to_string(), text_style)];
    }
    let (before, after) = input.value().split_at(input.cursor());
    vec![
        Span::styled(before.to_string(), text_style),
        Span::styled("\u{258C}", cursor_style),
        Span::styled(after.to_string(), text_style),
    ]
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    use crate::util::unicode::display_width;

    let indent_w = display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_w = indent_w;

    for word in text.split_whitespace() {
        let word_w = display_width(word);
        let space = usize::from(current_w > indent_w);
        if current_w + space + word_w > max_width && current_w > indent_w {
            lines.push(std::mem::replace(&mut current, indent.to_string()));
            current_w = indent_w;
        }
        if current_w > indent_w {
            current.push(' ');
            current_w += 1;
        }
        current.push_str(word);
        current_w += word_w;
    }
    if current_w > indent_w || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThemeMode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn highlight_splits_on_matches() {
        let re = Regex::new("(?i)milk").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Milk and milk",
            Style::default(),
            Style::default().bg(ratatui::style::Color::Red),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Milk", " and ", "milk"]);
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text(" ", "one two three four", 10);
        assert_eq!(lines, vec![" one two", " three", " four"]);
    }

    #[test]
    fn full_screen_shows_all_regions() {
        let mut app = app_with_titles(&["Water plants", "Call bank"]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("tasklet"));
        assert!(output.contains("Water plants"));
        assert!(output.contains("Call bank"));
        assert!(output.contains("Title"));
        assert!(output.contains("Search"));
        // Narrow terminal: no sidebars
        assert!(!output.contains("Filters"));
    }

    #[test]
    fn wide_screen_shows_sidebars() {
        let mut app = app_with_titles(&["a"]);
        let output = render_to_string(120, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("Filters"));
        assert!(output.contains("Actions"));
    }

    #[test]
    fn undo_hint_appears_after_delete() {
        let mut app = app_with_titles(&["Old chore", "b"]);
        let id = app.selected_id().unwrap();
        app.delete_task(&id);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("Undo delete of \"Old chore\""));
    }

    #[test]
    fn light_theme_changes_background() {
        let mut app = app_with_titles(&[]);
        app.toggle_theme();
        assert_eq!(app.theme_mode(), ThemeMode::Light);
        let backend = ratatui::backend::TestBackend::new(TERM_W, TERM_H);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let cell = terminal.backend().buffer()[(0, TERM_H - 1)].clone();
        assert_eq!(cell.bg, app.theme.background);
    }
}
