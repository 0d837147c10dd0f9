use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::io::storage::atomic_write;
use crate::model::task::{
    Attachment, AttachmentKind, DEFAULT_PROJECT, Importance, Recurrence, Task, UNTITLED,
    dedupe_tags, generate_id, now_timestamp,
};

/// Message for an import file that holds no usable records
pub const NO_VALID_TASKS: &str = "No valid tasks found in file.";

/// Error type for export and import
#[derive(Debug, thiserror::Error)]
pub enum TodoIoError {
    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid file format: expected an array")]
    NotAnArray,
    #[error("could not serialize tasks: {0}")]
    SerializeError(serde_json::Error),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A normalized record from an import file, before the store assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTask {
    /// Id found in the file, if any. The store replaces it on collision.
    pub id: Option<String>,
    /// May be empty; replaced with a placeholder when the task is built
    pub title: String,
    pub notes: String,
    pub completed: bool,
    pub importance: Importance,
    pub created_at: String,
    pub due_date: Option<NaiveDate>,
    pub project: String,
    pub tags: Vec<String>,
    pub recurrence: Recurrence,
    pub attachments: Vec<Attachment>,
}

impl ImportedTask {
    /// Build the final task under `id`
    pub fn into_task(self, id: String) -> Task {
        let title = if self.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            self.title
        };
        Task {
            id,
            title,
            notes: self.notes,
            completed: self.completed,
            importance: self.importance,
            created_at: self.created_at,
            due_date: self.due_date,
            project: self.project,
            tags: self.tags,
            recurrence: self.recurrence,
            attachments: self.attachments,
        }
    }
}

/// Why an element of an import file was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The element at this index was not a JSON object
    NotAnObject { index: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAnObject { index } => write!(f, "entry {} is not an object", index),
        }
    }
}

/// Result of parsing an import file
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    /// Accepted tasks in file order
    pub tasks: Vec<ImportedTask>,
    pub rejected: Vec<Rejection>,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// `todos-<ISO 8601 timestamp with ':' and '.' replaced by '-'>.json`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    let ts = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("todos-{}.json", ts)
}

/// Serialize the full collection as indented JSON
pub fn to_json(tasks: &[Task]) -> Result<String, TodoIoError> {
    serde_json::to_string_pretty(tasks).map_err(TodoIoError::SerializeError)
}

/// Write the collection to a timestamped file in `dir`, returning its path
pub fn export_todos(tasks: &[Task], dir: &Path) -> Result<PathBuf, TodoIoError> {
    export_todos_at(tasks, dir, Utc::now())
}

/// Same as [`export_todos`] with an explicit timestamp
pub fn export_todos_at(
    tasks: &[Task],
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, TodoIoError> {
    let content = to_json(tasks)?;
    fs::create_dir_all(dir).map_err(|e| TodoIoError::WriteError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = dir.join(export_file_name(now));
    atomic_write(&path, content.as_bytes()).map_err(|e| TodoIoError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), count = tasks.len(), "exported tasks");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Read and normalize an import file
pub fn read_todos_file(path: &Path) -> Result<ImportBatch, TodoIoError> {
    let text = fs::read_to_string(path).map_err(|e| TodoIoError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let batch = parse_todos(&text)?;
    tracing::info!(
        path = %path.display(),
        accepted = batch.tasks.len(),
        rejected = batch.rejected.len(),
        "parsed import file"
    );
    Ok(batch)
}

/// Parse JSON text whose top level must be an array of task-like objects
pub fn parse_todos(text: &str) -> Result<ImportBatch, TodoIoError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(TodoIoError::NotAnArray);
    };

    let now = now_timestamp();
    let mut batch = ImportBatch::default();
    for (index, item) in items.iter().enumerate() {
        match normalize_record(index, item, &now) {
            Ok(task) => batch.tasks.push(task),
            Err(rejection) => batch.rejected.push(rejection),
        }
    }
    Ok(batch)
}

/// Turn one untyped record into a well-formed task, or reject it.
///
/// Fallback rules, per field:
/// - `id`: non-empty string, or a number rendered as a string; otherwise none
/// - `title`: string; otherwise empty
/// - `completed`: truthiness of the value (missing = false)
/// - `importance`: a known value; else legacy `priority` (see [`importance_from_priority`]); else planned
/// - `notes`: string; otherwise empty
/// - `createdAt`: string; otherwise `now`
/// - `dueDate`: string starting with `YYYY-MM-DD`; otherwise none
/// - `project`: non-empty string; otherwise "General"
/// - `tags`: array of strings, or a lone string; otherwise empty
/// - `recurrence`: a known value; otherwise none
/// - `attachments`: array of objects (see [`normalize_attachment`]); otherwise empty
pub fn normalize_record(index: usize, value: &Value, now: &str) -> Result<ImportedTask, Rejection> {
    let Value::Object(obj) = value else {
        return Err(Rejection::NotAnObject { index });
    };

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let importance = str_field(obj, "importance")
        .and_then(Importance::parse)
        .or_else(|| str_field(obj, "priority").and_then(importance_from_priority))
        .unwrap_or_default();

    let tags = match obj.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    };

    let attachments = match obj.get("attachments") {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_attachment).collect(),
        _ => Vec::new(),
    };

    Ok(ImportedTask {
        id,
        title: str_field(obj, "title").unwrap_or_default().to_string(),
        notes: str_field(obj, "notes").unwrap_or_default().to_string(),
        completed: obj.get("completed").is_some_and(truthy),
        importance,
        created_at: str_field(obj, "createdAt").unwrap_or(now).to_string(),
        due_date: str_field(obj, "dueDate").and_then(parse_due_date),
        project: str_field(obj, "project")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PROJECT)
            .to_string(),
        tags: dedupe_tags(tags),
        recurrence: str_field(obj, "recurrence")
            .and_then(Recurrence::parse)
            .unwrap_or_default(),
        attachments,
    })
}

/// Map a legacy `priority` value onto the importance scale.
///
/// Current importance names map to themselves; `high` → urgent,
/// `medium`/`normal` → planned, `low` → optional. Anything else is unknown.
pub fn importance_from_priority(priority: &str) -> Option<Importance> {
    if let Some(importance) = Importance::parse(priority) {
        return Some(importance);
    }
    match priority.trim().to_ascii_lowercase().as_str() {
        "high" => Some(Importance::Urgent),
        "medium" | "normal" => Some(Importance::Planned),
        "low" => Some(Importance::Optional),
        _ => None,
    }
}

/// Normalize one attachment entry; non-objects are dropped.
///
/// `id` falls back to a generated id, `type` to file, `url` to the legacy
/// `link` field then empty, `name` to the url then "attachment".
pub fn normalize_attachment(value: &Value) -> Option<Attachment> {
    let obj = value.as_object()?;
    let url = str_field(obj, "url")
        .or_else(|| str_field(obj, "link"))
        .unwrap_or_default()
        .to_string();
    let name = str_field(obj, "name")
        .map(str::to_string)
        .or_else(|| (!url.is_empty()).then(|| url.clone()))
        .unwrap_or_else(|| "attachment".to_string());
    let kind = match str_field(obj, "type") {
        Some(t) if t.eq_ignore_ascii_case("link") => AttachmentKind::Link,
        _ => AttachmentKind::File,
    };
    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => generate_id(),
    };
    Some(Attachment { id, kind, url, name })
}

/// Day part of a stored due date (`2024-01-01` or a full timestamp)
fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// JavaScript-style truthiness, which is how older exports encoded flags
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
