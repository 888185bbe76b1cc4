//! PDF exporter.
//!
//! The drawing is first lowered into PDF-space operations (origin bottom-left,
//! Y up), then handed to a [`PdfBackend`] for encoding. The backend is an
//! optional capability resolved at startup with [`default_pdf_backend`].

use super::{ExportError, ExportFormat, ExportResult, Exporter};
use crate::grid::GridModel;
use crate::shapes::ShapeKind;
use kurbo::{Affine, Line, Point, Rect, Vec2};

/// A single drawing operation in PDF page space.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfOp {
    /// Light gray grid line, 1pt wide.
    StrokeLine(Line),
    /// Black filled rectangle, `x0/y0` is the bottom-left corner.
    FillRect(Rect),
    /// Black filled closed polygon.
    FillPolygon(Vec<Point>),
}

/// One page of PDF-space drawing operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Operations in paint order.
    pub ops: Vec<PdfOp>,
}

/// Encodes a laid-out page into PDF file bytes.
pub trait PdfBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Encode the page as a complete single-page PDF document.
    fn encode(&self, page: &PdfPage) -> ExportResult<Vec<u8>>;
}

/// The PDF backend compiled into this build, if any.
#[cfg(feature = "pdf")]
pub fn default_pdf_backend() -> Option<Box<dyn PdfBackend>> {
    Some(Box::new(super::PdfWriterBackend))
}

/// The PDF backend compiled into this build, if any.
#[cfg(not(feature = "pdf"))]
pub fn default_pdf_backend() -> Option<Box<dyn PdfBackend>> {
    None
}

/// Transform from the grid's top-left pixel space into PDF space.
fn flip_y(page_height: f64) -> Affine {
    Affine::FLIP_Y.then_translate(Vec2::new(0.0, page_height))
}

/// Lay out the model as PDF-space operations.
///
/// Every Y coordinate maps to `page_height - y`. Grid lines come first, then
/// shapes in insertion order.
pub fn layout_page(model: &GridModel) -> PdfPage {
    let grid = model.grid();
    let width = grid.pixel_width() as f64;
    let height = grid.pixel_height() as f64;
    let cell_size = grid.cell_size() as f64;
    let transform = flip_y(height);

    let mut ops = Vec::with_capacity((grid.cols() + grid.rows() + 2) as usize + model.len());

    for line in grid.vertical_lines().chain(grid.horizontal_lines()) {
        ops.push(PdfOp::StrokeLine(Line::new(
            transform * line.p0,
            transform * line.p1,
        )));
    }

    for shape in model.shapes() {
        let op = match shape.kind() {
            ShapeKind::Square => {
                PdfOp::FillRect(transform.transform_rect_bbox(shape.bounds(cell_size)))
            }
            ShapeKind::Triangle => PdfOp::FillPolygon(
                shape
                    .vertices(cell_size)
                    .into_iter()
                    .map(|p| transform * p)
                    .collect(),
            ),
        };
        ops.push(op);
    }

    PdfPage { width, height, ops }
}

/// Writes the grid and its shapes as a single vector PDF page.
pub struct PdfExporter {
    backend: Option<Box<dyn PdfBackend>>,
}

impl PdfExporter {
    /// Create an exporter with an explicit backend (or none).
    pub fn new(backend: Option<Box<dyn PdfBackend>>) -> Self {
        Self { backend }
    }

    /// Create an exporter with the backend compiled into this build.
    pub fn with_default_backend() -> Self {
        Self::new(default_pdf_backend())
    }

    /// Whether a backend is present.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::with_default_backend()
    }
}

impl std::fmt::Debug for PdfExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfExporter")
            .field("backend", &self.backend_name())
            .finish()
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn ensure_available(&self) -> ExportResult<()> {
        if self.backend.is_some() {
            Ok(())
        } else {
            log::error!("PDF export requested but no PDF backend is available");
            Err(ExportError::PdfBackendUnavailable)
        }
    }

    fn render(&self, model: &GridModel) -> ExportResult<Vec<u8>> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(ExportError::PdfBackendUnavailable)?;
        let page = layout_page(model);
        log::debug!(
            "Encoding {}x{} PDF page with {} ops via {}",
            page.width,
            page.height,
            page.ops.len(),
            backend.name()
        );
        backend.encode(&page)
    }
}
