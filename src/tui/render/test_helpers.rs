use std::path::PathBuf;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStore;
use crate::model::AppConfig;
use crate::ops::todos::{NewTask, TodoStore};
use crate::tui::app::App;
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an in-memory store whose list shows `titles` top to bottom.
/// Tasks get the default importance and project; today is 2024-06-10.
pub fn app_with_titles(titles: &[&str]) -> App {
    let mut store = TodoStore::default();
    for title in titles.iter().rev() {
        store.add(NewTask {
            title: (*title).to_string(),
            ..Default::default()
        });
    }
    let mut kv = MemoryStore::new();
    store.save(&mut kv).unwrap();
    let mut app = App::new(
        store,
        Box::new(kv),
        &AppConfig::default(),
        PathBuf::from("."),
    );
    app.today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    app
}

/// Send one unmodified key through the dispatcher.
pub fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

/// Send each character as a key press.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}
