use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::common::edit_text;

/// Path entry for an import
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    let Some(input) = app.import_prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.import_prompt = None,
        KeyCode::Enter => {
            let path = input.value().trim().to_string();
            app.import_prompt = None;
            if !path.is_empty() {
                app.import_from(&expand_home(&path));
            }
        }
        _ => {
            edit_text(input, key);
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
