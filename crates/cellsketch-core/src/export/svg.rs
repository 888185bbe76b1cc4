//! SVG exporter.

use super::{ExportError, ExportFormat, ExportResult, Exporter};
use crate::grid::GridModel;
use crate::shapes::{Shape, ShapeKind};
use kurbo::Line;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const GRID_STROKE: &str = "lightgray";
const GRID_STROKE_WIDTH: &str = "1";
const SHAPE_FILL: &str = "black";

/// Writes the grid and its shapes as a pretty-printed SVG 1.1 document.
///
/// SVG shares the top-left origin of the grid, so coordinates are written
/// as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render the document as a string.
    pub fn to_svg_string(&self, model: &GridModel) -> ExportResult<String> {
        let bytes = self.render(model)?;
        String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
    }
}

impl Exporter for SvgExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Svg
    }

    fn render(&self, model: &GridModel) -> ExportResult<Vec<u8>> {
        let grid = model.grid();
        let cell_size = grid.cell_size() as f64;
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let width = grid.pixel_width().to_string();
        let height = grid.pixel_height().to_string();
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NAMESPACE));
        root.push_attribute(("version", "1.1"));
        root.push_attribute(("width", width.as_str()));
        root.push_attribute(("height", height.as_str()));
        writer.write_event(Event::Start(root))?;

        for line in grid.vertical_lines().chain(grid.horizontal_lines()) {
            writer.write_event(Event::Empty(line_element(line)))?;
        }

        for shape in model.shapes() {
            writer.write_event(Event::Empty(shape_element(shape, cell_size)))?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }
}

fn line_element(line: Line) -> BytesStart<'static> {
    let mut element = BytesStart::new("line");
    push_number(&mut element, "x1", line.p0.x);
    push_number(&mut element, "y1", line.p0.y);
    push_number(&mut element, "x2", line.p1.x);
    push_number(&mut element, "y2", line.p1.y);
    element.push_attribute(("stroke", GRID_STROKE));
    element.push_attribute(("stroke-width", GRID_STROKE_WIDTH));
    element
}

fn shape_element(shape: &Shape, cell_size: f64) -> BytesStart<'static> {
    match shape.kind() {
        ShapeKind::Square => {
            let bounds = shape.bounds(cell_size);
            let mut element = BytesStart::new("rect");
            push_number(&mut element, "x", bounds.x0);
            push_number(&mut element, "y", bounds.y0);
            push_number(&mut element, "width", bounds.width());
            push_number(&mut element, "height", bounds.height());
            element.push_attribute(("fill", SHAPE_FILL));
            element
        }
        ShapeKind::Triangle => {
            let points = shape
                .vertices(cell_size)
                .iter()
                .map(|p| format!("{},{}", format_number(p.x), format_number(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            let mut element = BytesStart::new("polygon");
            element.push_attribute(("points", points.as_str()));
            element.push_attribute(("fill", SHAPE_FILL));
            element
        }
    }
}

fn push_number(element: &mut BytesStart<'_>, name: &str, value: f64) {
    let value = format_number(value);
    element.push_attribute((name, value.as_str()));
}

/// Whole numbers print without a fractional part ("40", not "40.0").
fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, Grid};

    fn model(cols: u32, rows: u32, cell_size: u32) -> GridModel {
        GridModel::new(Grid::new(cols, rows, cell_size).unwrap())
    }

    fn move_to(model: &mut GridModel, x: u32, y: u32) {
        for _ in 0..x {
            model.move_cursor(Direction::Right);
        }
        for _ in 0..y {
            model.move_cursor(Direction::Down);
        }
    }

    #[test]
    fn test_document_header_and_size() {
        let svg = SvgExporter::new().to_svg_string(&model(20, 15, 40)).unwrap();
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="800" height="600">"#
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_grid_has_only_lines() {
        let svg = SvgExporter::new().to_svg_string(&model(20, 15, 40)).unwrap();
        assert_eq!(svg.matches("<line ").count(), 21 + 16);
        assert_eq!(svg.matches("<rect ").count(), 0);
        assert_eq!(svg.matches("<polygon ").count(), 0);
        assert!(svg.contains(
            r#"<line x1="800" y1="0" x2="800" y2="600" stroke="lightgray" stroke-width="1"/>"#
        ));
        assert!(svg.contains(
            r#"<line x1="0" y1="600" x2="800" y2="600" stroke="lightgray" stroke-width="1"/>"#
        ));
    }

    #[test]
    fn test_square_position() {
        let mut model = model(20, 15, 40);
        move_to(&mut model, 2, 3);
        model.place_shape(ShapeKind::Square);

        let svg = SvgExporter::new().to_svg_string(&model).unwrap();
        assert!(svg.contains(r#"<rect x="80" y="120" width="40" height="40" fill="black"/>"#));
    }

    #[test]
    fn test_triangle_points() {
        let mut model = model(20, 15, 40);
        model.place_shape(ShapeKind::Triangle);

        let svg = SvgExporter::new().to_svg_string(&model).unwrap();
        assert!(svg.contains(r#"<polygon points="20,0 40,40 0,40" fill="black"/>"#));
    }

    #[test]
    fn test_odd_cell_size_keeps_half_pixel_apex() {
        let mut model = model(3, 3, 25);
        model.place_shape(ShapeKind::Triangle);

        let svg = SvgExporter::new().to_svg_string(&model).unwrap();
        assert!(svg.contains(r#"points="12.5,0 25,25 0,25""#));
    }

    #[test]
    fn test_shapes_follow_lines_in_insertion_order() {
        let mut model = model(4, 4, 10);
        model.place_shape(ShapeKind::Triangle);
        model.place_shape(ShapeKind::Square);

        let svg = SvgExporter::new().to_svg_string(&model).unwrap();
        let last_line = svg.rfind("<line ").unwrap();
        let triangle = svg.find("<polygon ").unwrap();
        let square = svg.find("<rect ").unwrap();
        assert!(last_line < triangle);
        assert!(triangle < square);
    }

    #[test]
    fn test_output_is_indented() {
        let svg = SvgExporter::new().to_svg_string(&model(1, 1, 10)).unwrap();
        assert!(svg.contains("\n  <line "));
    }
}
