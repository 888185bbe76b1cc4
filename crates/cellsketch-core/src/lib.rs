//! CellSketch Core Library
//!
//! Toolkit-independent grid model, editor commands and vector exporters.

pub mod command;
pub mod config;
pub mod export;
pub mod grid;
pub mod shapes;

pub use command::{Command, CommandDispatcher, CommandOutcome};
pub use config::{ConfigError, GridConfig};
pub use export::{
    DestinationPicker, ExportError, ExportFormat, ExportOutcome, ExportResult, Exporter,
    PdfBackend, PdfExporter, SvgExporter,
};
pub use grid::{Cell, Direction, Grid, GridError, GridModel};
pub use shapes::{Shape, ShapeKind};
