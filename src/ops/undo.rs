use crate::model::task::Task;

/// Single-slot holder for the most recently deleted task.
///
/// Staging overwrites whatever was held; taking empties the slot.
#[derive(Debug, Clone, Default)]
pub struct UndoSlot {
    deleted: Option<Task>,
}

impl UndoSlot {
    /// Hold `task`, dropping any earlier deletion
    pub fn stage(&mut self, task: Task) {
        self.deleted = Some(task);
    }

    pub fn take(&mut self) -> Option<Task> {
        self.deleted.take()
    }

    pub fn peek(&self) -> Option<&Task> {
        self.deleted.as_ref()
    }
}
