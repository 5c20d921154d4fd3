mod app;
mod event;
mod theme;
mod ui;

pub use app::{App, PageStatus};
pub use event::run_app;
