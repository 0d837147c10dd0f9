use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};

use super::common::edit_text;

/// Live search: every edit re-derives the list
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.focus = Focus::List,
        KeyCode::Esc => {
            app.clear_search();
            app.focus = Focus::List;
        }
        _ => {
            if edit_text(&mut app.search_input, key) {
                app.sync_search();
            }
        }
    }
}
