//! Vector export of the grid drawing to SVG and PDF files.

mod pdf;
mod svg;

#[cfg(feature = "pdf")]
mod pdf_backend;

pub use pdf::{PdfBackend, PdfExporter, PdfOp, PdfPage, default_pdf_backend, layout_page};
pub use svg::SvgExporter;

#[cfg(feature = "pdf")]
pub use pdf_backend::PdfWriterBackend;

use crate::grid::GridModel;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF export requires a PDF backend, and this build does not include one")]
    PdfBackendUnavailable,
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("SVG encoding error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("PDF encoding error: {0}")]
    Pdf(String),
    #[error("SVG output is not valid UTF-8: {0}")]
    Encoding(String),
}

impl ExportError {
    /// Short title for an error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ExportError::PdfBackendUnavailable | ExportError::Pdf(_) => "PDF Export Error",
            ExportError::Xml(_) | ExportError::Encoding(_) => "SVG Export Error",
            ExportError::Io { .. } => "Export Error",
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Supported export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Svg,
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Human-readable filter name for file dialogs.
    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Svg => "SVG Image",
            ExportFormat::Pdf => "PDF Document",
        }
    }

    /// Dialog title for choosing the destination.
    pub fn dialog_title(self) -> &'static str {
        match self {
            ExportFormat::Svg => "Save as SVG",
            ExportFormat::Pdf => "Save as PDF",
        }
    }
}

/// What happened to an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The drawing was written to this path.
    Saved(PathBuf),
    /// The user dismissed the destination dialog. Nothing was written.
    Cancelled,
}

/// Chooses where an export is written.
///
/// The desktop app asks with a native save dialog; returning `None` means the
/// user cancelled.
pub trait DestinationPicker {
    fn pick_destination(&self, format: ExportFormat, suggested_name: &str) -> Option<PathBuf>;
}

impl<F> DestinationPicker for F
where
    F: Fn(ExportFormat, &str) -> Option<PathBuf>,
{
    fn pick_destination(&self, format: ExportFormat, suggested_name: &str) -> Option<PathBuf> {
        self(format, suggested_name)
    }
}

/// Default file stem offered in save dialogs.
pub const DEFAULT_FILE_STEM: &str = "drawing";

/// Trait implemented by each export format.
pub trait Exporter {
    /// Format written by this exporter.
    fn format(&self) -> ExportFormat;

    /// Check that the exporter can run at all. Called before asking for a
    /// destination, so an unusable exporter never opens a dialog.
    fn ensure_available(&self) -> ExportResult<()> {
        Ok(())
    }

    /// Encode the model into the file contents.
    fn render(&self, model: &GridModel) -> ExportResult<Vec<u8>>;

    /// Ask for a destination and write the encoded drawing there.
    fn export(
        &self,
        model: &GridModel,
        picker: &dyn DestinationPicker,
    ) -> ExportResult<ExportOutcome> {
        self.ensure_available()?;

        let format = self.format();
        let suggested = format!("{}.{}", DEFAULT_FILE_STEM, format.extension());
        let Some(path) = picker.pick_destination(format, &suggested) else {
            log::info!("{} cancelled", format.dialog_title());
            return Ok(ExportOutcome::Cancelled);
        };

        let path = with_extension(path, format);
        let bytes = self.render(model)?;
        write_file(&path, &bytes)?;
        log::info!("Exported {} shapes to {:?}", model.len(), path);
        Ok(ExportOutcome::Saved(path))
    }
}

/// Append the format's extension when the chosen path has none.
pub fn with_extension(mut path: PathBuf, format: ExportFormat) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(format.extension());
    }
    path
}

fn write_file(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::shapes::ShapeKind;
    use tempfile::tempdir;

    fn sample_model() -> GridModel {
        let mut model = GridModel::new(Grid::new(4, 3, 10).unwrap());
        model.place_shape(ShapeKind::Square);
        model
    }

    #[test]
    fn test_with_extension_appends_missing() {
        let path = with_extension(PathBuf::from("out/drawing"), ExportFormat::Svg);
        assert_eq!(path, PathBuf::from("out/drawing.svg"));
    }

    #[test]
    fn test_with_extension_keeps_existing() {
        let path = with_extension(PathBuf::from("drawing.PDF"), ExportFormat::Pdf);
        assert_eq!(path, PathBuf::from("drawing.PDF"));
    }

    #[test]
    fn test_cancelled_export_writes_nothing() {
        let dir = tempdir().unwrap();
        let model = sample_model();
        let picker = |_: ExportFormat, _: &str| -> Option<PathBuf> { None };

        let outcome = SvgExporter::new().export(&model, &picker).unwrap();

        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_writes_to_picked_path() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("grid");
        let model = sample_model();
        let picker = |format: ExportFormat, suggested: &str| {
            assert_eq!(format, ExportFormat::Svg);
            assert_eq!(suggested, "drawing.svg");
            Some(target.clone())
        };

        let outcome = SvgExporter::new().export(&model, &picker).unwrap();

        let written = dir.path().join("grid.svg");
        assert_eq!(outcome, ExportOutcome::Saved(written.clone()));
        let contents = std::fs::read_to_string(written).unwrap();
        assert!(contents.starts_with("<?xml"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("drawing.svg");
        let model = sample_model();
        let picker = |_: ExportFormat, _: &str| Some(target.clone());

        let result = SvgExporter::new().export(&model, &picker);

        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_unavailable_pdf_never_asks_for_destination() {
        let model = sample_model();
        let picker = |_: ExportFormat, _: &str| -> Option<PathBuf> {
            panic!("destination dialog must not open without a backend")
        };

        let result = PdfExporter::new(None).export(&model, &picker);

        assert!(matches!(result, Err(ExportError::PdfBackendUnavailable)));
        assert_eq!(model.len(), 1);
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_cancelled_pdf_export_writes_nothing() {
        let dir = tempdir().unwrap();
        let model = sample_model();
        let picker = |format: ExportFormat, suggested: &str| -> Option<PathBuf> {
            assert_eq!(format, ExportFormat::Pdf);
            assert_eq!(suggested, "drawing.pdf");
            None
        };

        let outcome = PdfExporter::with_default_backend()
            .export(&model, &picker)
            .unwrap();

        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_pdf_export_writes_flipped_square() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("drawing");
        let mut model = GridModel::new(Grid::new(20, 15, 40).unwrap());
        model.move_cursor(crate::grid::Direction::Right);
        model.move_cursor(crate::grid::Direction::Right);
        for _ in 0..3 {
            model.move_cursor(crate::grid::Direction::Down);
        }
        model.place_shape(ShapeKind::Square);
        let picker = |_: ExportFormat, _: &str| Some(target.clone());

        let outcome = PdfExporter::with_default_backend()
            .export(&model, &picker)
            .unwrap();

        let written = dir.path().join("drawing.pdf");
        assert_eq!(outcome, ExportOutcome::Saved(written.clone()));
        let bytes = std::fs::read(written).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("80 440 40 40 re"));
    }

    #[test]
    fn test_error_titles() {
        assert_eq!(ExportError::PdfBackendUnavailable.title(), "PDF Export Error");
        assert_eq!(ExportError::Pdf("bad".into()).title(), "PDF Export Error");
        assert_eq!(ExportError::Encoding("bad".into()).title(), "SVG Export Error");
    }
}
