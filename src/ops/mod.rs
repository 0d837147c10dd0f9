pub mod todos;
pub mod undo;
pub mod view;
