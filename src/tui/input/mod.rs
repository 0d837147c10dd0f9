mod common;
mod edit;
mod form;
mod menu;
mod navigate;
mod prompt;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use common::normalize_key;

/// Handle a key event for whatever currently owns input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);
    app.status_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.should_quit = true;
        return;
    }

    // Notice popup: any key dismisses
    if app.notice.is_some() {
        app.notice = None;
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.import_prompt.is_some() {
        prompt::handle_prompt(app, key);
        return;
    }

    if app.editor.is_some() {
        edit::handle_edit(app, key);
        return;
    }

    if handle_shortcut(app, key) {
        return;
    }

    if app.menu_open {
        menu::handle_menu(app, key);
        return;
    }

    match app.focus {
        Focus::List => navigate::handle_navigate(app, key),
        Focus::Form => form::handle_form(app, key),
        Focus::Search => search::handle_search(app, key),
    }
}

/// Ctrl+K, Ctrl+Shift+E and Ctrl+Shift+I. Returns true when the key was one of them.
fn handle_shortcut(app: &mut App, key: KeyEvent) -> bool {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char('k') => app.shortcut_focus_form(),
        KeyCode::Char('E') => app.shortcut_export(),
        KeyCode::Char('I') => app.shortcut_import(),
        _ => return false,
    }
    true
}
