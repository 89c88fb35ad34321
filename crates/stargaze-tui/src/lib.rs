// Terminal UI implementation using ratatui

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, AppAction, InputMode, VisibleRow};
pub use runner::run_tui;
