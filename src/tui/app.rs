use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io::read_config;
use crate::io::storage::{self, KeyValueStore, THEME_KEY, open_store};
use crate::io::todo_io::{NO_VALID_TASKS, export_todos, read_todos_file};
use crate::logging::{LogTarget, init_tracing};
use crate::model::{AppConfig, Task, ThemeMode, UiConfig};
use crate::ops::todos::{NewTask, TodoStore};
use crate::ops::view::{StatusFilter, ViewCriteria, derive_view};
use crate::util::text_input::TextInput;

use super::editor::EditOverlay;
use super::form::TaskForm;
use super::input;
use super::render;
use super::theme::Theme;

/// Which main region receives keys when no overlay is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Form,
    Search,
}

/// Entries of the menu panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Filter(StatusFilter),
    MarkAllDone,
    ClearCompleted,
    ToggleSort,
    Export,
    Import,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 8] = [
        MenuEntry::Filter(StatusFilter::All),
        MenuEntry::Filter(StatusFilter::Active),
        MenuEntry::Filter(StatusFilter::Done),
        MenuEntry::MarkAllDone,
        MenuEntry::ClearCompleted,
        MenuEntry::ToggleSort,
        MenuEntry::Export,
        MenuEntry::Import,
    ];

    pub fn label(self, criteria: &ViewCriteria) -> &'static str {
        match self {
            MenuEntry::Filter(f) => f.label(),
            MenuEntry::MarkAllDone => "Mark all done",
            MenuEntry::ClearCompleted => "Clear completed",
            MenuEntry::ToggleSort if criteria.sort_by_due => "Unsort",
            MenuEntry::ToggleSort => "Sort by due",
            MenuEntry::Export => "Export",
            MenuEntry::Import => "Import",
        }
    }
}

/// Main application state
pub struct App {
    pub store: TodoStore,
    kv: Box<dyn KeyValueStore>,
    pub criteria: ViewCriteria,
    pub theme: Theme,
    ui: UiConfig,
    pub focus: Focus,
    pub form: TaskForm,
    pub search_input: TextInput,
    /// Edit overlay, owning input while open
    pub editor: Option<EditOverlay>,
    pub menu_open: bool,
    pub menu_cursor: usize,
    /// Path being typed for an import
    pub import_prompt: Option<TextInput>,
    /// Modal message dismissed by any key
    pub notice: Option<String>,
    pub show_help: bool,
    /// Index into the visible list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// One-shot message in the status row, cleared on the next key
    pub status_message: Option<String>,
    pub today: NaiveDate,
    pub export_dir: PathBuf,
    pub default_project: String,
    pub show_key_hints: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        store: TodoStore,
        kv: Box<dyn KeyValueStore>,
        config: &AppConfig,
        export_dir: PathBuf,
    ) -> Self {
        let mode = storage::load_or(kv.as_ref(), THEME_KEY, ThemeMode::default());
        App {
            store,
            kv,
            criteria: ViewCriteria::default(),
            theme: Theme::for_mode(mode, &config.ui),
            ui: config.ui.clone(),
            focus: Focus::List,
            form: TaskForm::new(config.defaults.importance),
            search_input: TextInput::default(),
            editor: None,
            menu_open: false,
            menu_cursor: 0,
            import_prompt: None,
            notice: None,
            show_help: false,
            cursor: 0,
            scroll_offset: 0,
            status_message: None,
            today: Local::now().date_naive(),
            export_dir,
            default_project: config.defaults.project.clone(),
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode
    }

    /// Tasks after filter, sort, and search
    pub fn visible_tasks(&self) -> Vec<&Task> {
        derive_view(self.store.tasks(), &self.criteria)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor).copied()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Case-insensitive regex of the live search, for highlighting
    pub fn search_re(&self) -> Option<Regex> {
        let query = self.criteria.search.trim();
        if query.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(query))).ok()
    }

    /// True while a notice, the import prompt, or the edit overlay holds input
    pub fn modal_open(&self) -> bool {
        self.notice.is_some() || self.import_prompt.is_some() || self.editor.is_some()
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = self.store.save(self.kv.as_mut()) {
            tracing::warn!(error = %e, "could not save tasks");
        }
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, mut payload: NewTask) {
        if payload.project.is_none() {
            payload.project = Some(self.default_project.clone());
        }
        if self.store.add(payload).is_some() {
            self.persist_tasks();
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }

    pub fn toggle_task(&mut self, id: &str) {
        if self.store.toggle(id) {
            self.persist_tasks();
            self.clamp_cursor();
        }
    }

    pub fn delete_task(&mut self, id: &str) {
        if self.editor.as_ref().is_some_and(|ed| ed.task_id == id) {
            self.close_editor();
        }
        let title = self.store.get(id).map(|t| t.title.clone());
        if self.store.remove(id) {
            self.persist_tasks();
            self.clamp_cursor();
            if let Some(title) = title {
                self.status_message = Some(format!("Deleted \"{}\"", title));
            }
        }
    }

    pub fn undo_delete(&mut self) {
        if self.store.undo_delete() {
            self.persist_tasks();
            self.cursor = 0;
            self.scroll_offset = 0;
            self.status_message = Some("Restored".into());
        }
    }

    pub fn clear_completed(&mut self) {
        let removed = self.store.clear_completed();
        if removed > 0 {
            self.persist_tasks();
            self.clamp_cursor();
        }
        self.status_message = Some(format!("Cleared {} completed", removed));
    }

    pub fn mark_all_done(&mut self) {
        if self.store.remaining_count() > 0 {
            self.store.mark_all_done();
            self.persist_tasks();
            self.clamp_cursor();
        }
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.criteria.filter = filter;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn toggle_sort(&mut self) {
        self.criteria.sort_by_due = !self.criteria.sort_by_due;
        self.clamp_cursor();
    }

    /// Apply the live search text
    pub fn sync_search(&mut self) {
        self.criteria.search = self.search_input.value().to_string();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.sync_search();
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.theme_mode().toggled();
        self.theme = Theme::for_mode(mode, &self.ui);
        if let Err(e) = storage::save(self.kv.as_mut(), THEME_KEY, &mode) {
            tracing::warn!(error = %e, "could not save theme");
        }
    }

    /// Write the whole collection to the export directory
    pub fn export(&mut self) {
        match export_todos(self.store.tasks(), &self.export_dir) {
            Ok(path) => {
                self.status_message = Some(format!(
                    "Exported {} tasks to {}",
                    self.store.len(),
                    path.display()
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.notice = Some(format!("Export failed: {}", e));
            }
        }
    }

    pub fn open_import_prompt(&mut self) {
        self.menu_open = false;
        self.import_prompt = Some(TextInput::default());
    }

    /// Read and merge an import file. Failures leave the collection untouched.
    pub fn import_from(&mut self, path: &Path) {
        let batch = match read_todos_file(path) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "import failed");
                self.notice = Some(e.to_string());
                return;
            }
        };
        if batch.tasks.is_empty() {
            self.notice = Some(NO_VALID_TASKS.into());
            return;
        }
        let skipped = batch.rejected.len();
        let count = self.store.import_batch(batch.tasks);
        self.persist_tasks();
        self.cursor = 0;
        self.scroll_offset = 0;
        tracing::info!(path = %path.display(), count, skipped, "imported tasks");
        self.notice = Some(if skipped > 0 {
            format!("Imported {} tasks ({} skipped).", count, skipped)
        } else {
            format!("Imported {} tasks.", count)
        });
    }

    pub fn focus_form_title(&mut self) {
        self.menu_open = false;
        self.show_help = false;
        self.focus = Focus::Form;
        self.form.field = super::form::FormField::Title;
    }

    /// Submit the creation form; a bad due date stays inline in the form
    pub fn submit_form(&mut self) {
        match self.form.submit() {
            Ok(Some(payload)) => self.add_task(payload),
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "form rejected"),
        }
    }

    pub fn open_editor(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let overlay = EditOverlay::open(task, self.scroll_offset);
        self.editor = Some(overlay);
    }

    /// Close the overlay by any path, restoring the locked list offset
    pub fn close_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            self.scroll_offset = editor.lock.release();
        }
    }

    /// Commit the draft. An invalid due date keeps the overlay open.
    pub fn save_editor(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.draft.to_update() {
            Ok(update) => {
                let id = editor.task_id.clone();
                if self.store.edit(&id, update) {
                    self.persist_tasks();
                }
                self.close_editor();
                self.clamp_cursor();
            }
            Err(e) => editor.error = Some(e),
        }
    }

    pub fn run_menu_entry(&mut self, entry: MenuEntry) {
        self.menu_open = false;
        match entry {
            MenuEntry::Filter(f) => self.set_filter(f),
            MenuEntry::MarkAllDone => self.mark_all_done(),
            MenuEntry::ClearCompleted => self.clear_completed(),
            MenuEntry::ToggleSort => self.toggle_sort(),
            MenuEntry::Export => self.export(),
            MenuEntry::Import => self.open_import_prompt(),
        }
    }

    // -----------------------------------------------------------------------
    // Global shortcuts: no-ops while a modal owns input
    // -----------------------------------------------------------------------

    pub fn shortcut_focus_form(&mut self) {
        if !self.modal_open() {
            self.focus_form_title();
        }
    }

    pub fn shortcut_export(&mut self) {
        if !self.modal_open() {
            self.export();
        }
    }

    pub fn shortcut_import(&mut self) {
        if !self.modal_open() {
            self.open_import_prompt();
        }
    }
}

/// Run the TUI against the data directory
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config_result = read_config(data_dir);
    let config = config_result.as_ref().cloned().unwrap_or_default();
    if let Err(e) = init_tracing(LogTarget::File(data_dir.join("tasklet.log")), &config.log.level) {
        eprintln!("warning: logging disabled: {}", e);
    }
    if let Err(e) = &config_result {
        tracing::warn!(error = %e, "bad config.toml, using defaults");
    }
    tracing::info!(dir = %data_dir.display(), "starting tui");

    let kv = open_store(data_dir);
    let store = TodoStore::load(kv.as_ref());
    let export_dir = config
        .export
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let mut app = App::new(store, kv, &config, export_dir);

    let enhanced_keys = config
        .ui
        .kitty_keyboard
        .unwrap_or_else(|| supports_keyboard_enhancement().unwrap_or(false));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if enhanced_keys {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    tracing::info!("tui closed");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.today = Local::now().date_naive();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
