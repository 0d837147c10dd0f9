pub mod app;
pub mod editor;
pub mod form;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
