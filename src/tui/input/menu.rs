use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, MenuEntry};

pub(super) fn handle_menu(app: &mut App, key: KeyEvent) {
    let count = MenuEntry::ALL.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => app.menu_open = false,
        KeyCode::Char('j') | KeyCode::Down => app.menu_cursor = (app.menu_cursor + 1) % count,
        KeyCode::Char('k') | KeyCode::Up => {
            app.menu_cursor = (app.menu_cursor + count - 1) % count;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(entry) = MenuEntry::ALL.get(app.menu_cursor).copied() {
                app.run_menu_entry(entry);
            }
        }
        _ => {}
    }
}
