use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::editor::EditField;

use super::common::edit_text;

/// Keys while the edit overlay is open. The overlay owns all input.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            app.close_editor();
            return;
        }
        KeyCode::Enter | KeyCode::Char('s') if ctrl => {
            app.save_editor();
            return;
        }
        KeyCode::Char('d') if ctrl => {
            if let Some(id) = app.editor.as_ref().map(|e| e.task_id.clone()) {
                app.delete_task(&id);
            }
            return;
        }
        _ => {}
    }

    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    match (editor.field, key.code) {
        (_, KeyCode::Tab) | (_, KeyCode::Down) => editor.field = editor.field.next(),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => editor.field = editor.field.prev(),
        (EditField::Completed, KeyCode::Char(' ') | KeyCode::Enter) => {
            // Completion is applied immediately, not held in the draft
            let id = editor.task_id.clone();
            app.toggle_task(&id);
        }
        (EditField::Importance, KeyCode::Left) => {
            editor.draft.importance = editor.draft.importance.prev();
        }
        (EditField::Importance, KeyCode::Right | KeyCode::Char(' ')) => {
            editor.draft.importance = editor.draft.importance.next();
        }
        (_, KeyCode::Enter) => editor.field = editor.field.next(),
        _ => {
            if let Some(input) = editor.active_input()
                && edit_text(input, key)
            {
                editor.error = None;
            }
        }
    }
}
