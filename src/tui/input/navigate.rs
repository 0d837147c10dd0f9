use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::view::StatusFilter;
use crate::tui::app::{App, Focus};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible_tasks().len().saturating_sub(1);
        }

        // Task actions
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_id() {
                app.toggle_task(&id);
            }
        }
        KeyCode::Enter | KeyCode::Char('e') => app.open_editor(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_id() {
                app.delete_task(&id);
            }
        }
        KeyCode::Char('u') => app.undo_delete(),
        KeyCode::Char('A') => app.mark_all_done(),
        KeyCode::Char('C') => app.clear_completed(),

        // View
        KeyCode::Char('1') => app.set_filter(StatusFilter::All),
        KeyCode::Char('2') => app.set_filter(StatusFilter::Active),
        KeyCode::Char('3') => app.set_filter(StatusFilter::Done),
        KeyCode::Char('f') => app.set_filter(app.criteria.filter.next()),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('a') | KeyCode::Tab => app.focus_form_title(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('m') => {
            app.menu_open = true;
            app.menu_cursor = 0;
        }
        KeyCode::Esc if !app.criteria.search.is_empty() => app.clear_search(),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible_tasks().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_titles, press};

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app_with_titles(&["a", "b"]);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn space_toggles_selected() {
        let mut app = app_with_titles(&["a", "b"]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.store.tasks()[0].completed);
        assert!(app.store.tasks()[1].completed);
    }

    #[test]
    fn delete_then_undo_restores() {
        let mut app = app_with_titles(&["a", "b", "c"]);
        let before = app.store.tasks().to_vec();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.len(), 2);
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.store.tasks(), before.as_slice());
    }

    #[test]
    fn filter_keys_reset_cursor() {
        let mut app = app_with_titles(&["a", "b"]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.criteria.filter, StatusFilter::Active);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.criteria.filter, StatusFilter::Done);
    }

    #[test]
    fn mark_all_and_clear() {
        let mut app = app_with_titles(&["a", "b"]);
        press(&mut app, KeyCode::Char('A'));
        assert_eq!(app.store.done_count(), 2);
        press(&mut app, KeyCode::Char('C'));
        assert!(app.store.is_empty());
    }

    #[test]
    fn enter_opens_editor_on_selection() {
        let mut app = app_with_titles(&["a", "b"]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let id = app.store.tasks()[1].id.clone();
        assert_eq!(app.editor.as_ref().map(|e| e.task_id.clone()), Some(id));
    }

    #[test]
    fn enter_on_empty_list_does_nothing() {
        let mut app = app_with_titles(&[]);
        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_none());
    }
}
