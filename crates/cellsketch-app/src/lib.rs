//! CellSketch Application
//!
//! The desktop shell: window, keyboard input, File menu and status bar
//! around the grid model.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{render_ui, ErrorMessage, UiAction, UiState};
