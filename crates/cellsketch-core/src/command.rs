//! Editor commands and their dispatch into the model and exporters.
//!
//! Host key bindings and menu entries translate into [`Command`]s, so none of
//! the model or export logic depends on a particular GUI toolkit.

use crate::export::{
    DestinationPicker, ExportFormat, ExportOutcome, ExportResult, Exporter, PdfExporter,
    SvgExporter,
};
use crate::grid::{Direction, GridModel};
use crate::shapes::{Shape, ShapeKind};

/// Everything the user can ask the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PlaceSquare,
    PlaceTriangle,
    ExportSvg,
    ExportPdf,
}

impl Command {
    /// All commands, in menu/help order.
    pub const ALL: [Command; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveUp,
        Command::MoveDown,
        Command::PlaceSquare,
        Command::PlaceTriangle,
        Command::ExportSvg,
        Command::ExportPdf,
    ];

    /// Cursor direction for movement commands.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }

    /// Shape kind for placement commands.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Command::PlaceSquare => Some(ShapeKind::Square),
            Command::PlaceTriangle => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    /// Target format for export commands.
    pub fn export_format(self) -> Option<ExportFormat> {
        match self {
            Command::ExportSvg => Some(ExportFormat::Svg),
            Command::ExportPdf => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    /// Get display name for this command.
    pub fn description(self) -> &'static str {
        match self {
            Command::MoveLeft => "Move cursor left",
            Command::MoveRight => "Move cursor right",
            Command::MoveUp => "Move cursor up",
            Command::MoveDown => "Move cursor down",
            Command::PlaceSquare => "Place square",
            Command::PlaceTriangle => "Place triangle",
            Command::ExportSvg => "Save as SVG",
            Command::ExportPdf => "Save as PDF",
        }
    }
}

/// Result of a successfully dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Cursor movement. `moved` is false when blocked by the grid edge.
    CursorMoved { moved: bool },
    /// A shape was appended.
    Placed(Shape),
    /// An export ran (or was cancelled).
    Exported(ExportOutcome),
}

/// Dispatches commands to the model and the exporters.
#[derive(Debug)]
pub struct CommandDispatcher {
    svg: SvgExporter,
    pdf: PdfExporter,
}

impl CommandDispatcher {
    /// Create a dispatcher with the given PDF exporter.
    pub fn new(pdf: PdfExporter) -> Self {
        Self {
            svg: SvgExporter::new(),
            pdf,
        }
    }

    /// Whether PDF export can run in this build.
    pub fn pdf_available(&self) -> bool {
        self.pdf.is_available()
    }

    /// Exporter for a given format.
    pub fn exporter(&self, format: ExportFormat) -> &dyn Exporter {
        match format {
            ExportFormat::Svg => &self.svg,
            ExportFormat::Pdf => &self.pdf,
        }
    }

    /// Apply a command. Model commands never fail; export commands may.
    ///
    /// A failed export leaves the model untouched.
    pub fn dispatch(
        &self,
        model: &mut GridModel,
        command: Command,
        picker: &dyn DestinationPicker,
    ) -> ExportResult<CommandOutcome> {
        let outcome = match command {
            Command::MoveLeft => Self::move_cursor(model, Direction::Left),
            Command::MoveRight => Self::move_cursor(model, Direction::Right),
            Command::MoveUp => Self::move_cursor(model, Direction::Up),
            Command::MoveDown => Self::move_cursor(model, Direction::Down),
            Command::PlaceSquare => CommandOutcome::Placed(*model.place_shape(ShapeKind::Square)),
            Command::PlaceTriangle => {
                CommandOutcome::Placed(*model.place_shape(ShapeKind::Triangle))
            }
            Command::ExportSvg => self.export(model, ExportFormat::Svg, picker)?,
            Command::ExportPdf => self.export(model, ExportFormat::Pdf, picker)?,
        };
        Ok(outcome)
    }

    fn move_cursor(model: &mut GridModel, direction: Direction) -> CommandOutcome {
        CommandOutcome::CursorMoved {
            moved: model.move_cursor(direction),
        }
    }

    fn export(
        &self,
        model: &GridModel,
        format: ExportFormat,
        picker: &dyn DestinationPicker,
    ) -> ExportResult<CommandOutcome> {
        let outcome = self.exporter(format).export(model, picker)?;
        Ok(CommandOutcome::Exported(outcome))
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(PdfExporter::with_default_backend())
    }
}
