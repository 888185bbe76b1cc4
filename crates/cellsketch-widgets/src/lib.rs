//! Small egui widgets used by the CellSketch window chrome.
//!
//! - **Menu**: menu entries with shortcut hints, separators, the popup frame
//! - **Status**: the bottom bar with cursor position and key hints

pub mod menu;
pub mod status;

pub use menu::{menu_header, menu_item, menu_item_enabled, menu_separator, panel_frame};
pub use status::{error_banner, key_hint, status_frame, status_value};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Height of a single menu row
    pub const MENU_ROW: f32 = 28.0;
    /// Height of a key cap in the status bar
    pub const KEY_CAP: f32 = 18.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Disabled text color
    pub const TEXT_DISABLED: Color32 = Color32::from_gray(180);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Error banner background (red-50)
    pub const ERROR_BG: Color32 = Color32::from_rgb(254, 242, 242);
    /// Error banner text (red-700)
    pub const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);
}
