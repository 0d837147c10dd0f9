use crate::model::task::{Importance, parse_date_input};
use crate::ops::todos::NewTask;
use crate::util::text_input::TextInput;

/// Field of the creation form that has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Importance,
    Due,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Title,
        FormField::Importance,
        FormField::Due,
        FormField::Notes,
    ];

    pub fn next(self) -> FormField {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> FormField {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Importance => "Importance",
            FormField::Due => "Due",
            FormField::Notes => "Notes",
        }
    }
}

/// Drafts of the new-task form
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: TextInput,
    pub importance: Importance,
    pub due: TextInput,
    pub notes: TextInput,
    pub field: FormField,
    /// Inline validation message (bad due date)
    pub error: Option<String>,
    default_importance: Importance,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::new(Importance::Focus)
    }
}

impl TaskForm {
    pub fn new(default_importance: Importance) -> Self {
        TaskForm {
            title: TextInput::default(),
            importance: default_importance,
            due: TextInput::default(),
            notes: TextInput::default(),
            field: FormField::Title,
            error: None,
            default_importance,
        }
    }

    /// The text buffer of the focused field (None on the importance picker)
    pub fn active_input(&mut self) -> Option<&mut TextInput> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Due => Some(&mut self.due),
            FormField::Notes => Some(&mut self.notes),
            FormField::Importance => None,
        }
    }

    /// Build the add payload. Ok(None) when the title is blank (nothing to do);
    /// Err when the due date does not parse. On success the drafts reset and
    /// focus returns to the title.
    pub fn submit(&mut self) -> Result<Option<NewTask>, String> {
        if self.title.is_blank() {
            return Ok(None);
        }
        let due_date = match parse_date_input(self.due.value()) {
            Ok(due) => due,
            Err(e) => {
                self.error = Some(e.clone());
                self.field = FormField::Due;
                return Err(e);
            }
        };
        let payload = NewTask {
            title: self.title.value().trim().to_string(),
            importance: Some(self.importance),
            due_date,
            notes: self.notes.value().to_string(),
            ..Default::default()
        };
        self.reset();
        Ok(Some(payload))
    }

    pub fn reset(&mut self) {
        *self = TaskForm::new(self.default_importance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filled(title: &str, due: &str) -> TaskForm {
        let mut form = TaskForm::default();
        form.title.set(title);
        form.due.set(due);
        form
    }

    #[test]
    fn blank_title_is_a_noop() {
        let mut form = filled("   ", "2024-01-01");
        assert_eq!(form.submit().unwrap().map(|p| p.title), None);
        // Drafts untouched
        assert_eq!(form.due.value(), "2024-01-01");
    }

    #[test]
    fn submit_trims_and_resets() {
        let mut form = filled("  Water plants ", "2024-07-04");
        form.importance = Importance::Urgent;
        form.field = FormField::Notes;
        form.notes.set("balcony");

        let payload = form.submit().unwrap().unwrap();
        assert_eq!(payload.title, "Water plants");
        assert_eq!(payload.importance, Some(Importance::Urgent));
        assert_eq!(payload.due_date, NaiveDate::from_ymd_opt(2024, 7, 4));
        assert_eq!(payload.notes, "balcony");

        assert_eq!(form.title.value(), "");
        assert_eq!(form.due.value(), "");
        assert_eq!(form.importance, Importance::Focus);
        assert_eq!(form.field, FormField::Title);
    }

    #[test]
    fn notes_are_saved_verbatim() {
        let mut form = filled("Task", "");
        form.notes.set("  indented\n");
        let payload = form.submit().unwrap().unwrap();
        assert_eq!(payload.notes, "  indented\n");
    }

    #[test]
    fn bad_due_date_blocks_submit() {
        let mut form = filled("Task", "next week");
        assert!(form.submit().is_err());
        assert!(form.error.is_some());
        assert_eq!(form.field, FormField::Due);
        assert_eq!(form.title.value(), "Task");
    }

    #[test]
    fn fields_cycle_both_ways() {
        assert_eq!(FormField::Notes.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Notes);
        assert_eq!(FormField::Title.next(), FormField::Importance);
    }

    #[test]
    fn reset_keeps_configured_default() {
        let mut form = TaskForm::new(Importance::Optional);
        form.importance = Importance::Urgent;
        form.reset();
        assert_eq!(form.importance, Importance::Optional);
    }
}
