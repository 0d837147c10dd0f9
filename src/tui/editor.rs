use crate::model::task::{Importance, Task, UNTITLED, parse_date_input};
use crate::ops::todos::TaskUpdate;
use crate::util::text_input::TextInput;

/// Focusable parts of the edit overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditField {
    Completed,
    #[default]
    Title,
    Due,
    Notes,
    Importance,
}

impl EditField {
    const ORDER: [EditField; 5] = [
        EditField::Completed,
        EditField::Title,
        EditField::Due,
        EditField::Notes,
        EditField::Importance,
    ];

    pub fn next(self) -> EditField {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> EditField {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Uncommitted copy of the editable fields of one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub title: TextInput,
    pub due: TextInput,
    pub notes: TextInput,
    pub importance: Importance,
}

impl EditDraft {
    pub fn from_task(task: &Task) -> Self {
        EditDraft {
            title: TextInput::new(task.title.clone()),
            due: TextInput::new(
                task.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            notes: TextInput::new(task.notes.clone()),
            importance: task.importance,
        }
    }

    /// Turn the draft into an update. A blank title becomes the placeholder and a
    /// blank due date clears it; an unparseable date is an error.
    pub fn to_update(&self) -> Result<TaskUpdate, String> {
        let title = self.title.value().trim();
        let title = if title.is_empty() { UNTITLED } else { title };
        let due_date = parse_date_input(self.due.value())?;
        Ok(TaskUpdate {
            title: Some(title.to_string()),
            due_date: Some(due_date),
            notes: Some(self.notes.value().to_string()),
            importance: Some(self.importance),
            ..Default::default()
        })
    }
}

/// List scroll offset remembered while the overlay is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollLock {
    saved_offset: usize,
}

impl ScrollLock {
    pub fn engage(offset: usize) -> Self {
        ScrollLock {
            saved_offset: offset,
        }
    }

    /// Offset to put back when the overlay closes
    pub fn release(self) -> usize {
        self.saved_offset
    }

    pub fn offset(&self) -> usize {
        self.saved_offset
    }
}

/// Expanded editor for one task
#[derive(Debug, Clone)]
pub struct EditOverlay {
    pub task_id: String,
    pub draft: EditDraft,
    pub field: EditField,
    pub error: Option<String>,
    pub lock: ScrollLock,
}

impl EditOverlay {
    /// Open on `task`, with a fresh draft and the list offset locked
    pub fn open(task: &Task, scroll_offset: usize) -> Self {
        EditOverlay {
            task_id: task.id.clone(),
            draft: EditDraft::from_task(task),
            field: EditField::Title,
            error: None,
            lock: ScrollLock::engage(scroll_offset),
        }
    }

    pub fn active_input(&mut self) -> Option<&mut TextInput> {
        match self.field {
            EditField::Title => Some(&mut self.draft.title),
            EditField::Due => Some(&mut self.draft.due),
            EditField::Notes => Some(&mut self.draft.notes),
            EditField::Completed | EditField::Importance => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task() -> Task {
        let mut t = Task::new("t1".into(), "Renew passport".into(), "2024-01-01T00:00:00.000Z".into());
        t.due_date = NaiveDate::from_ymd_opt(2024, 8, 1);
        t.notes = "photo booth first".into();
        t.importance = Importance::Urgent;
        t
    }

    #[test]
    fn draft_mirrors_task() {
        let draft = EditDraft::from_task(&task());
        assert_eq!(draft.title.value(), "Renew passport");
        assert_eq!(draft.due.value(), "2024-08-01");
        assert_eq!(draft.notes.value(), "photo booth first");
        assert_eq!(draft.importance, Importance::Urgent);
    }

    #[test]
    fn blank_title_and_due_normalize() {
        let mut draft = EditDraft::from_task(&task());
        draft.title.set("   ");
        draft.due.clear();
        let update = draft.to_update().unwrap();
        assert_eq!(update.title.as_deref(), Some("Untitled task"));
        assert_eq!(update.due_date, Some(None));
    }

    #[test]
    fn bad_due_is_an_error() {
        let mut draft = EditDraft::from_task(&task());
        draft.due.set("08/01/2024");
        assert!(draft.to_update().is_err());
    }

    #[test]
    fn open_locks_offset() {
        let overlay = EditOverlay::open(&task(), 7);
        assert_eq!(overlay.lock.offset(), 7);
        assert_eq!(overlay.lock.release(), 7);
        assert_eq!(overlay.field, EditField::Title);
    }

    #[test]
    fn fields_wrap() {
        assert_eq!(EditField::Importance.next(), EditField::Completed);
        assert_eq!(EditField::Completed.prev(), EditField::Importance);
    }
}
