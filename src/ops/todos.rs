use std::collections::HashSet;

use chrono::NaiveDate;

use crate::io::storage::{self, KeyValueStore, StorageError, TODOS_KEY};
use crate::io::todo_io::{self, ImportedTask};
use crate::model::task::{
    Attachment, DEFAULT_PROJECT, Importance, Recurrence, Task, dedupe_tags, generate_id,
    now_timestamp,
};

use super::undo::UndoSlot;

/// Error type for id-addressed operations from the CLI
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("id prefix '{0}' matches more than one task")]
    Ambiguous(String),
    #[error("title cannot be empty")]
    EmptyTitle,
}

/// Payload for creating a task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub importance: Option<Importance>,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    pub project: Option<String>,
    pub tags: Vec<String>,
    pub recurrence: Option<Recurrence>,
    pub attachments: Vec<Attachment>,
}

/// Shallow update merged into an existing task. `None` leaves a field alone.
///
/// Id and creation time are deliberately absent: they never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
    pub importance: Option<Importance>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<NaiveDate>>,
    pub project: Option<String>,
    pub tags: Option<Vec<String>>,
    pub recurrence: Option<Recurrence>,
    pub attachments: Option<Vec<Attachment>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TaskUpdate::default()
    }

    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(importance) = self.importance {
            task.importance = importance;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(project) = self.project {
            let project = project.trim();
            task.project = if project.is_empty() {
                DEFAULT_PROJECT.to_string()
            } else {
                project.to_string()
            };
        }
        if let Some(tags) = self.tags {
            task.tags = dedupe_tags(tags);
        }
        if let Some(recurrence) = self.recurrence {
            task.recurrence = recurrence;
        }
        if let Some(attachments) = self.attachments {
            task.attachments = attachments;
        }
    }
}

/// The authoritative task collection (newest first) plus the undo slot.
///
/// Every mutation goes through these methods.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    tasks: Vec<Task>,
    undo: UndoSlot,
}

impl TodoStore {
    /// Load the saved collection, normalizing each record the same way an import does.
    /// Missing or corrupt data yields an empty store.
    pub fn load(kv: &dyn KeyValueStore) -> Self {
        let mut store = TodoStore::default();
        let Some(raw) = kv.get(TODOS_KEY) else {
            return store;
        };
        match todo_io::parse_todos(&raw) {
            Ok(batch) => {
                if !batch.rejected.is_empty() {
                    tracing::warn!(dropped = batch.rejected.len(), "dropped malformed saved tasks");
                }
                store.import_batch(batch.tasks);
            }
            Err(e) => tracing::warn!(error = %e, "saved tasks are corrupt, starting empty"),
        }
        store
    }

    /// Replace the saved collection with the current one
    pub fn save(&self, kv: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        storage::save(kv, TODOS_KEY, &self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn last_deleted(&self) -> Option<&Task> {
        self.undo.peek()
    }

    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Find the one task whose id equals or starts with `prefix`
    pub fn resolve_id(&self, prefix: &str) -> Result<String, TodoError> {
        if let Some(task) = self.get(prefix) {
            return Ok(task.id.clone());
        }
        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) if !prefix.is_empty() => Ok(task.id.clone()),
            (Some(_), Some(_)) => Err(TodoError::Ambiguous(prefix.to_string())),
            _ => Err(TodoError::NotFound(prefix.to_string())),
        }
    }

    /// Create a task at the front of the collection and return its id.
    /// Returns None, changing nothing, when the title is blank.
    pub fn add(&mut self, payload: NewTask) -> Option<String> {
        let title = payload.title.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.fresh_id(&HashSet::new());
        let project = payload
            .project
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string());
        let task = Task {
            id: id.clone(),
            title: title.to_string(),
            notes: payload.notes,
            completed: false,
            importance: payload.importance.unwrap_or_default(),
            created_at: now_timestamp(),
            due_date: payload.due_date,
            project,
            tags: dedupe_tags(payload.tags),
            recurrence: payload.recurrence.unwrap_or_default(),
            attachments: payload.attachments,
        };
        tracing::debug!(id = %id, "added task");
        self.tasks.insert(0, task);
        Some(id)
    }

    /// Flip completion; false if no task has this id
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                tracing::debug!(id, completed = task.completed, "toggled task");
                true
            }
            None => false,
        }
    }

    /// Merge `update` into the task; false if no task has this id
    pub fn edit(&mut self, id: &str, update: TaskUpdate) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                update.apply(task);
                tracing::debug!(id, "edited task");
                true
            }
            None => false,
        }
    }

    /// Delete the task and hold it for one undo; false if no task has this id
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let task = self.tasks.remove(idx);
        tracing::debug!(id, "removed task");
        self.undo.stage(task);
        true
    }

    /// Put the last deleted task back at the front. False when nothing is held.
    pub fn undo_delete(&mut self) -> bool {
        let Some(mut task) = self.undo.take() else {
            return false;
        };
        // An import may have reused the id while the task was out
        if self.get(&task.id).is_some() {
            task.id = self.fresh_id(&HashSet::new());
        }
        tracing::debug!(id = %task.id, "restored deleted task");
        self.tasks.insert(0, task);
        true
    }

    /// Remove every completed task, keeping the order of the rest
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    /// Mark every task completed
    pub fn mark_all_done(&mut self) {
        for task in &mut self.tasks {
            task.completed = true;
        }
    }

    /// Prepend a normalized batch in file order. Ids that are missing, already
    /// used, or repeated within the batch are replaced. Returns the count added.
    pub fn import_batch(&mut self, batch: Vec<ImportedTask>) -> usize {
        let mut taken: HashSet<String> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let mut prepared = Vec::with_capacity(batch.len() + self.tasks.len());
        for item in batch {
            let id = match &item.id {
                Some(id) if !taken.contains(id) => id.clone(),
                _ => self.fresh_id(&taken),
            };
            taken.insert(id.clone());
            prepared.push(item.into_task(id));
        }
        let count = prepared.len();
        prepared.append(&mut self.tasks);
        self.tasks = prepared;
        count
    }

    fn fresh_id(&self, taken: &HashSet<String>) -> String {
        loop {
            let id = generate_id();
            if !taken.contains(&id) && self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStore;
    use crate::io::todo_io::parse_todos;
    use pretty_assertions::assert_eq;

    fn payload(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn store_with(titles: &[&str]) -> TodoStore {
        let mut store = TodoStore::default();
        // Added in reverse so the first title ends up at the front
        for title in titles.iter().rev() {
            store.add(payload(title));
        }
        store
    }

    fn titles(store: &TodoStore) -> Vec<String> {
        store.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn add_prepends_with_unique_id() {
        let mut store = store_with(&["old"]);
        let before = store.len();
        let id = store.add(payload("  new  ")).unwrap();

        assert_eq!(store.len(), before + 1);
        assert_eq!(store.tasks()[0].id, id);
        assert_eq!(store.tasks()[0].title, "new");
        assert_ne!(store.tasks()[0].id, store.tasks()[1].id);
    }

    #[test]
    fn add_fills_defaults() {
        let mut store = TodoStore::default();
        store.add(payload("x"));
        let t = &store.tasks()[0];
        assert!(!t.completed);
        assert_eq!(t.importance, Importance::Planned);
        assert_eq!(t.project, "General");
        assert_eq!(t.recurrence, Recurrence::None);
        assert!(!t.created_at.is_empty());
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut store = TodoStore::default();
        assert_eq!(store.add(payload("   ")), None);
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_twice_restores_task() {
        let mut store = store_with(&["a"]);
        let original = store.tasks()[0].clone();
        assert!(store.toggle(&original.id));
        assert!(store.tasks()[0].completed);
        assert!(store.toggle(&original.id));
        assert_eq!(store.tasks()[0], original);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut store = store_with(&["a"]);
        let before = store.tasks().to_vec();
        assert!(!store.toggle("missing"));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn edit_merges_only_given_fields() {
        let mut store = store_with(&["a"]);
        let id = store.tasks()[0].id.clone();
        let created = store.tasks()[0].created_at.clone();
        let due = NaiveDate::from_ymd_opt(2024, 9, 1);

        assert!(store.edit(
            &id,
            TaskUpdate {
                title: Some("renamed".into()),
                due_date: Some(due),
                ..Default::default()
            }
        ));
        let t = store.get(&id).unwrap();
        assert_eq!(t.title, "renamed");
        assert_eq!(t.due_date, due);
        assert_eq!(t.created_at, created);
        assert_eq!(t.importance, Importance::Planned);

        store.edit(
            &id,
            TaskUpdate {
                due_date: Some(None),
                ..Default::default()
            },
        );
        assert_eq!(store.get(&id).unwrap().due_date, None);
        assert!(!store.edit("missing", TaskUpdate::default()));
    }

    #[test]
    fn blank_project_edit_falls_back_to_default() {
        let mut store = store_with(&["a", "b"]);
        let id = store.tasks()[0].id.clone();
        store.edit(
            &id,
            TaskUpdate {
                project: Some("   ".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.get(&id).unwrap().project, DEFAULT_PROJECT);

        let json = todo_io::to_json(store.tasks()).unwrap();
        let batch = parse_todos(&json).unwrap();
        let mut restored = TodoStore::default();
        restored.import_batch(batch.tasks);
        assert_eq!(restored.tasks(), store.tasks());
    }

    #[test]
    fn remove_then_undo_restores_exactly() {
        let mut store = store_with(&["a", "b", "c"]);
        let before = store.tasks().to_vec();
        let id = before[0].id.clone();

        assert!(store.remove(&id));
        assert_eq!(store.len(), 2);
        assert!(store.undo_delete());
        assert_eq!(store.tasks(), before.as_slice());
        assert!(store.last_deleted().is_none());

        // Second undo does nothing
        assert!(!store.undo_delete());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn undo_reinserts_at_front() {
        let mut store = store_with(&["a", "b", "c"]);
        let middle = store.tasks()[1].id.clone();
        store.remove(&middle);
        store.undo_delete();
        assert_eq!(titles(&store), vec!["b", "a", "c"]);
    }

    #[test]
    fn second_delete_overwrites_undo_slot() {
        let mut store = store_with(&["a", "b"]);
        let a = store.tasks()[0].id.clone();
        let b = store.tasks()[1].id.clone();
        store.remove(&a);
        store.remove(&b);
        assert_eq!(store.last_deleted().map(|t| t.title.as_str()), Some("b"));
        store.undo_delete();
        assert_eq!(titles(&store), vec!["b"]);
        assert!(!store.undo_delete());
    }

    #[test]
    fn remove_unknown_id_keeps_undo_slot() {
        let mut store = store_with(&["a"]);
        let a = store.tasks()[0].id.clone();
        store.remove(&a);
        assert!(!store.remove("missing"));
        assert_eq!(store.last_deleted().map(|t| t.id.clone()), Some(a));
    }

    #[test]
    fn clear_completed_preserves_order() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let b = store.tasks()[1].id.clone();
        let d = store.tasks()[3].id.clone();
        store.toggle(&b);
        store.toggle(&d);

        assert_eq!(store.clear_completed(), 2);
        assert_eq!(titles(&store), vec!["a", "c"]);
    }

    #[test]
    fn mark_all_done_completes_everything() {
        let mut store = store_with(&["a", "b"]);
        store.mark_all_done();
        assert_eq!(store.remaining_count(), 0);
        assert_eq!(store.done_count(), 2);
    }

    #[test]
    fn import_prepends_in_file_order() {
        let mut store = store_with(&["existing"]);
        let batch = parse_todos(r#"[{"id": "x1", "title": "first"}, {"id": "x2", "title": "second"}]"#)
            .unwrap();
        assert_eq!(store.import_batch(batch.tasks), 2);
        assert_eq!(titles(&store), vec!["first", "second", "existing"]);
        assert_eq!(store.tasks()[0].id, "x1");
    }

    #[test]
    fn import_remaps_colliding_ids() {
        let mut store = TodoStore::default();
        store.import_batch(parse_todos(r#"[{"id": "same", "title": "kept"}]"#).unwrap().tasks);
        let batch = parse_todos(
            r#"[{"id": "same", "title": "clash"}, {"title": "no id"}, {"id": "dup", "title": "d1"}, {"id": "dup", "title": "d2"}]"#,
        )
        .unwrap();
        store.import_batch(batch.tasks);

        let ids: HashSet<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), store.len());
        assert_eq!(store.get("same").map(|t| t.title.as_str()), Some("kept"));
        assert_eq!(store.get("dup").map(|t| t.title.as_str()), Some("d1"));
    }

    #[test]
    fn import_defaults_blank_titles() {
        let mut store = TodoStore::default();
        store.import_batch(parse_todos(r#"[{"completed": true}]"#).unwrap().tasks);
        assert_eq!(store.tasks()[0].title, "Untitled task");
        assert!(store.tasks()[0].completed);
    }

    #[test]
    fn undo_after_id_reuse_gets_fresh_id() {
        let mut store = TodoStore::default();
        store.import_batch(parse_todos(r#"[{"id": "k", "title": "one"}]"#).unwrap().tasks);
        store.remove("k");
        store.import_batch(parse_todos(r#"[{"id": "k", "title": "two"}]"#).unwrap().tasks);
        store.undo_delete();

        assert_eq!(store.len(), 2);
        assert_ne!(store.tasks()[0].id, store.tasks()[1].id);
        assert_eq!(store.tasks()[0].title, "one");
    }

    #[test]
    fn resolve_id_by_prefix() {
        let mut store = TodoStore::default();
        store.import_batch(
            parse_todos(r#"[{"id": "abc123"}, {"id": "abd456"}]"#)
                .unwrap()
                .tasks,
        );
        assert_eq!(store.resolve_id("abc").unwrap(), "abc123");
        assert!(matches!(store.resolve_id("ab"), Err(TodoError::Ambiguous(_))));
        assert!(matches!(store.resolve_id("zz"), Err(TodoError::NotFound(_))));
        assert!(matches!(store.resolve_id(""), Err(TodoError::Ambiguous(_))));
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut kv = MemoryStore::new();
        let store = store_with(&["a", "b"]);
        store.save(&mut kv).unwrap();

        let loaded = TodoStore::load(&kv);
        assert_eq!(loaded.tasks(), store.tasks());
    }

    #[test]
    fn load_defaults_legacy_records() {
        let mut kv = MemoryStore::new();
        kv.set(TODOS_KEY, r#"[{"id": "1", "title": "old", "priority": "high"}]"#)
            .unwrap();
        let loaded = TodoStore::load(&kv);
        assert_eq!(loaded.tasks()[0].importance, Importance::Urgent);
    }

    #[test]
    fn load_corrupt_value_is_empty() {
        let mut kv = MemoryStore::new();
        kv.set(TODOS_KEY, "{oops").unwrap();
        assert!(TodoStore::load(&kv).is_empty());
    }
}
