//! Shape primitives anchored to grid cells.

use crate::grid::Cell;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two placeable shape primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Fills the whole cell.
    Square,
    /// Apex-up triangle with its base on the cell's bottom edge.
    Triangle,
}

impl ShapeKind {
    /// Get display name for this shape kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed shape. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    kind: ShapeKind,
    cell: Cell,
}

impl Shape {
    pub(crate) fn new(kind: ShapeKind, cell: Cell) -> Self {
        Self { kind, cell }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Pixel bounds of the shape in top-left space.
    pub fn bounds(&self, cell_size: f64) -> Rect {
        Rect::from_origin_size(self.origin(cell_size), (cell_size, cell_size))
    }

    /// Outline vertices in top-left pixel space.
    ///
    /// Squares wind clockwise from the top-left corner. Triangles start at the
    /// apex, then the bottom-right and bottom-left corners.
    pub fn vertices(&self, cell_size: f64) -> Vec<Point> {
        let Point { x, y } = self.origin(cell_size);
        match self.kind {
            ShapeKind::Square => vec![
                Point::new(x, y),
                Point::new(x + cell_size, y),
                Point::new(x + cell_size, y + cell_size),
                Point::new(x, y + cell_size),
            ],
            ShapeKind::Triangle => vec![
                Point::new(x + cell_size / 2.0, y),
                Point::new(x + cell_size, y + cell_size),
                Point::new(x, y + cell_size),
            ],
        }
    }

    /// Closed outline path in top-left pixel space.
    pub fn to_path(&self, cell_size: f64) -> BezPath {
        let mut path = BezPath::new();
        let vertices = self.vertices(cell_size);
        if let Some((first, rest)) = vertices.split_first() {
            path.move_to(*first);
            for point in rest {
                path.line_to(*point);
            }
            path.close_path();
        }
        path
    }

    fn origin(&self, cell_size: f64) -> Point {
        Point::new(self.cell.x as f64 * cell_size, self.cell.y as f64 * cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape as KurboShape};

    fn assert_points(actual: &[Point], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (point, (x, y)) in actual.iter().zip(expected) {
            assert!((point.x - x).abs() < f64::EPSILON, "{:?} != ({}, {})", point, x, y);
            assert!((point.y - y).abs() < f64::EPSILON, "{:?} != ({}, {})", point, x, y);
        }
    }

    #[test]
    fn test_triangle_vertices_at_origin() {
        let triangle = Shape::new(ShapeKind::Triangle, Cell::new(0, 0));
        assert_points(&triangle.vertices(40.0), &[(20.0, 0.0), (40.0, 40.0), (0.0, 40.0)]);
    }

    #[test]
    fn test_triangle_vertices_offset_cell() {
        let triangle = Shape::new(ShapeKind::Triangle, Cell::new(2, 3));
        assert_points(
            &triangle.vertices(40.0),
            &[(100.0, 120.0), (120.0, 160.0), (80.0, 160.0)],
        );
    }

    #[test]
    fn test_square_bounds() {
        let square = Shape::new(ShapeKind::Square, Cell::new(2, 3));
        let bounds = square.bounds(40.0);
        assert!((bounds.x0 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 120.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 120.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 160.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_path_is_closed() {
        let triangle = Shape::new(ShapeKind::Triangle, Cell::new(1, 1));
        let path = triangle.to_path(10.0);
        let elements = path.elements();
        assert_eq!(elements.len(), 4);
        assert!(matches!(elements[0], PathEl::MoveTo(_)));
        assert!(matches!(elements[3], PathEl::ClosePath));
        // Half the cell for an apex-up triangle
        assert!((path.area().abs() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ShapeKind::Square.to_string(), "square");
        assert_eq!(ShapeKind::Triangle.name(), "triangle");
    }
}
