//! Status bar pieces.

use egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};

use crate::{sizing, theme};

/// Frame for the status bar along the bottom of the window.
pub fn status_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .stroke(Stroke::new(1.0, theme::BORDER))
        .inner_margin(Margin::symmetric(12, 4))
}

/// A muted label followed by its value, e.g. "Cursor (3, 4)".
pub fn status_value(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).size(11.0).color(theme::TEXT_MUTED));
    ui.label(RichText::new(value).size(12.0).color(theme::TEXT).monospace());
    ui.add_space(8.0);
}

/// A key cap with the action it triggers.
pub fn key_hint(ui: &mut Ui, key: &str, action: &str) {
    Frame::new()
        .fill(Color32::WHITE)
        .stroke(Stroke::new(1.0, theme::BORDER))
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .inner_margin(Margin::symmetric(4, 0))
        .show(ui, |ui| {
            ui.set_min_height(sizing::KEY_CAP);
            ui.label(RichText::new(key).size(11.0).color(theme::TEXT).monospace());
        });
    ui.label(RichText::new(action).size(11.0).color(theme::TEXT_MUTED));
    ui.add_space(6.0);
}

/// A dismissable error line. Returns true when the close button is clicked.
pub fn error_banner(ui: &mut Ui, title: &str, message: &str) -> bool {
    let mut dismissed = false;
    Frame::new()
        .fill(theme::ERROR_BG)
        .stroke(Stroke::new(1.0, theme::ERROR_TEXT.gamma_multiply(0.4)))
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .inner_margin(Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(title).strong().color(theme::ERROR_TEXT));
                ui.label(RichText::new(message).color(theme::ERROR_TEXT));
                if ui.small_button("✕").clicked() {
                    dismissed = true;
                }
            });
        });
    dismissed
}
