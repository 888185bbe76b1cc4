//! `pdf-writer` based PDF backend.

use super::pdf::{PdfBackend, PdfOp, PdfPage};
use super::ExportResult;
use pdf_writer::{Content, Finish, Pdf, Ref};

/// Light gray (`#d3d3d3`) as PDF RGB components.
const GRID_STROKE_RGB: (f32, f32, f32) = (211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0);
const GRID_STROKE_WIDTH: f32 = 1.0;

/// Encodes pages with the `pdf-writer` crate. Content streams are left
/// uncompressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriterBackend;

impl PdfWriterBackend {
    fn content_stream(page: &PdfPage) -> Vec<u8> {
        let mut content = Content::new();
        let (r, g, b) = GRID_STROKE_RGB;
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(GRID_STROKE_WIDTH);
        content.set_fill_rgb(0.0, 0.0, 0.0);

        for op in &page.ops {
            match op {
                PdfOp::StrokeLine(line) => {
                    content.move_to(line.p0.x as f32, line.p0.y as f32);
                    content.line_to(line.p1.x as f32, line.p1.y as f32);
                    content.stroke();
                }
                PdfOp::FillRect(rect) => {
                    content.rect(
                        rect.x0 as f32,
                        rect.y0 as f32,
                        rect.width() as f32,
                        rect.height() as f32,
                    );
                    content.fill_nonzero();
                }
                PdfOp::FillPolygon(points) => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    content.move_to(first.x as f32, first.y as f32);
                    for point in rest {
                        content.line_to(point.x as f32, point.y as f32);
                    }
                    content.close_path();
                    content.fill_nonzero();
                }
            }
        }

        content.finish()
    }
}

impl PdfBackend for PdfWriterBackend {
    fn name(&self) -> &'static str {
        "pdf-writer"
    }

    fn encode(&self, page: &PdfPage) -> ExportResult<Vec<u8>> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(pdf_writer::Rect::new(
                0.0,
                0.0,
                page.width as f32,
                page.height as f32,
            ))
            .parent(page_tree_id)
            .contents(content_id);
        page_writer.finish();

        let content = Self::content_stream(page);
        pdf.stream(content_id, &content);

        Ok(pdf.finish())
    }
}
