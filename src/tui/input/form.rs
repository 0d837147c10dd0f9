use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};
use crate::tui::form::FormField;

use super::common::edit_text;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Tab => app.form.field = app.form.field.next(),
        KeyCode::BackTab => app.form.field = app.form.field.prev(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Left if app.form.field == FormField::Importance => {
            app.form.importance = app.form.importance.prev();
        }
        KeyCode::Right | KeyCode::Char(' ') if app.form.field == FormField::Importance => {
            app.form.importance = app.form.importance.next();
        }
        _ => {
            if let Some(input) = app.form.active_input()
                && edit_text(input, key)
            {
                app.form.error = None;
            }
        }
    }
}
