use serde::Serialize;

use crate::model::task::{Recurrence, Task};

/// Characters of the id shown in text output; any unique prefix is accepted back
pub const SHORT_ID_LEN: usize = 8;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub remaining: usize,
    pub done: usize,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct ImportJson {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Serialize)]
pub struct CountJson {
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!(
        "[{}] {}  {}  !{}",
        check,
        short_id(&task.id),
        task.title,
        task.importance
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {}", due.format("%Y-%m-%d")));
    }
    line.push_str(&format!("  @{}", task.project));
    if task.recurrence != Recurrence::None {
        line.push_str(&format!("  \u{21BB}{}", task.recurrence.as_str()));
    }
    for tag in &task.tags {
        line.push_str(&format!(" #{}", tag));
    }
    line
}

/// One line per task plus a summary footer
pub fn format_listing(tasks: &[&Task], remaining: usize, done: usize) -> Vec<String> {
    let mut lines: Vec<String> = tasks.iter().map(|t| format_task_line(t)).collect();
    if tasks.is_empty() {
        lines.push("No tasks.".to_string());
    }
    lines.push(String::new());
    lines.push(format!("{} remaining \u{00B7} {} done", remaining, done));
    lines
}
