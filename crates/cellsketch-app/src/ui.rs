//! UI components using egui.

use cellsketch_core::{Cell, Command, ExportError};
use egui::{Align2, Color32, Context, CornerRadius, Pos2, Rect, Vec2};

use crate::shortcuts::ShortcutRegistry;
use cellsketch_widgets::{
    error_banner, key_hint, menu_header, menu_item, menu_item_enabled, menu_separator,
    panel_frame, status_frame, status_value,
};

/// Height reserved above the grid for the menu button.
pub const MENU_BAR_HEIGHT: f32 = 56.0;
/// Height of the status bar below the grid.
pub const STATUS_BAR_HEIGHT: f32 = 30.0;

const MENU_WIDTH: f32 = 200.0;
const FILE_MENU_ID: &str = "file_menu_dropdown";

/// An export error waiting to be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
}

impl From<&ExportError> for ErrorMessage {
    fn from(err: &ExportError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

/// UI state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Is the File menu open?
    pub menu_open: bool,
    /// Whether a PDF backend is compiled in.
    pub pdf_available: bool,
    /// Last export error, shown until dismissed.
    pub error: Option<ErrorMessage>,
    /// Cursor cell, mirrored from the model each frame.
    pub cursor: Cell,
    /// Number of placed shapes.
    pub shape_count: usize,
    /// Grid size in cells.
    pub grid_size: (u32, u32),
}

impl UiState {
    pub fn new(pdf_available: bool) -> Self {
        Self {
            pdf_available,
            ..Default::default()
        }
    }

    pub fn show_error(&mut self, err: &ExportError) {
        self.error = Some(ErrorMessage::from(err));
    }
}

/// Actions triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Run an editor command from a menu entry.
    Run(Command),
    /// Close the error banner.
    DismissError,
}

/// Render all UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    // Bottom panel first so the central area excludes it
    render_status_bar(ctx, ui_state);
    let file_action = render_file_menu(ctx, ui_state);
    let error_action = render_error(ctx, ui_state);

    file_action.or(error_action)
}

/// Render the hamburger button and the File menu dropdown at top-left.
fn render_file_menu(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    let button_rect = egui::Area::new(egui::Id::new("hamburger_button"))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 8.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                if hamburger_button(ui, ui_state.menu_open) {
                    ui_state.menu_open = !ui_state.menu_open;
                }
            });
        })
        .response
        .rect;

    if !ui_state.menu_open {
        return None;
    }

    let menu_rect = egui::Area::new(egui::Id::new(FILE_MENU_ID))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 60.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(MENU_WIDTH);
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(0.0, 2.0);
                    menu_header(ui, "File");

                    let svg_hint = ShortcutRegistry::label_for(Command::ExportSvg).unwrap_or_default();
                    if menu_item(ui, Command::ExportSvg.description(), &svg_hint) {
                        action = Some(UiAction::Run(Command::ExportSvg));
                        ui_state.menu_open = false;
                    }

                    let pdf_hint = ShortcutRegistry::label_for(Command::ExportPdf).unwrap_or_default();
                    let pdf_item = menu_item_enabled(
                        ui,
                        Command::ExportPdf.description(),
                        &pdf_hint,
                        ui_state.pdf_available,
                    );
                    if pdf_item {
                        action = Some(UiAction::Run(Command::ExportPdf));
                        ui_state.menu_open = false;
                    }

                    if !ui_state.pdf_available {
                        menu_separator(ui);
                        ui.label(
                            egui::RichText::new("PDF support is not included in this build")
                                .size(11.0)
                                .color(cellsketch_widgets::theme::TEXT_MUTED),
                        );
                    }
                });
            });
        })
        .response
        .rect;

    // Close menu when clicking outside
    if action.is_none() && ctx.input(|i| i.pointer.any_click()) {
        if let Some(pos) = ctx.input(|i| i.pointer.interact_pos()) {
            if !button_rect.contains(pos) && !menu_rect.contains(pos) {
                ui_state.menu_open = false;
            }
        }
    }

    action
}

/// Render the pending error, if any, just right of the menu button.
fn render_error(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let error = ui_state.error.as_ref()?;
    let mut action = None;

    egui::Area::new(egui::Id::new("export_error"))
        .anchor(Align2::LEFT_TOP, Vec2::new(68.0, 12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            if error_banner(ui, &error.title, &error.message) {
                action = Some(UiAction::DismissError);
            }
        });

    action
}

/// Render the status bar: cursor position, shape count, key hints.
fn render_status_bar(ctx: &Context, ui_state: &UiState) {
    egui::TopBottomPanel::bottom("status_bar")
        .exact_height(STATUS_BAR_HEIGHT)
        .frame(status_frame())
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let (cols, rows) = ui_state.grid_size;
                status_value(ui, "Grid", &format!("{cols}×{rows}"));
                status_value(
                    ui,
                    "Cursor",
                    &format!("({}, {})", ui_state.cursor.x, ui_state.cursor.y),
                );
                status_value(ui, "Shapes", &ui_state.shape_count.to_string());

                ui.separator();
                key_hint(ui, "Arrows", "move");
                key_hint(ui, "S", "square");
                key_hint(ui, "T", "triangle");
            });
        });
}

/// Draw a hamburger menu button (three horizontal lines).
fn hamburger_button(ui: &mut egui::Ui, is_open: bool) -> bool {
    let size = Vec2::new(32.0, 32.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let bg_color = if is_open {
            Color32::from_rgb(59, 130, 246)
        } else if response.hovered() {
            Color32::from_gray(235)
        } else {
            Color32::TRANSPARENT
        };

        let line_color = if is_open {
            Color32::WHITE
        } else {
            Color32::from_gray(80)
        };

        ui.painter().rect_filled(rect, CornerRadius::same(6), bg_color);

        let line_width = 14.0;
        let line_height = 2.0;
        let spacing = 4.0;
        let start_x = rect.center().x - line_width / 2.0;
        let center_y = rect.center().y;

        for i in -1..=1 {
            let y = center_y + (i as f32) * spacing;
            let line_rect = Rect::from_min_size(
                Pos2::new(start_x, y - line_height / 2.0),
                Vec2::new(line_width, line_height),
            );
            ui.painter().rect_filled(line_rect, CornerRadius::same(1), line_color);
        }
    }

    response.on_hover_text("File").clicked()
}
