//! Grid geometry, cursor and placed-shape state.

use crate::shapes::{Shape, ShapeKind};
use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest drawing width or height in pixels. Coordinates up to this value
/// are exact as `f32`, which the PDF content stream uses.
pub const MAX_PIXEL_EXTENT: u32 = 1 << 24;

/// Grid construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Grid {0} must be a positive integer")]
    ZeroDimension(&'static str),
    #[error("Grid of {cols}x{rows} cells at {cell_size}px exceeds {max}px per side", max = MAX_PIXEL_EXTENT)]
    TooLarge { cols: u32, rows: u32, cell_size: u32 },
}

/// A grid cell coordinate (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Fixed grid dimensions. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cell_size: u32,
}

impl Grid {
    /// Create a grid of `cols` x `rows` cells, each `cell_size` pixels wide.
    pub fn new(cols: u32, rows: u32, cell_size: u32) -> Result<Self, GridError> {
        if cols == 0 {
            return Err(GridError::ZeroDimension("cols"));
        }
        if rows == 0 {
            return Err(GridError::ZeroDimension("rows"));
        }
        if cell_size == 0 {
            return Err(GridError::ZeroDimension("cell_size"));
        }
        let fits = |n: u32| n.checked_mul(cell_size).is_some_and(|px| px <= MAX_PIXEL_EXTENT);
        if !fits(cols) || !fits(rows) {
            return Err(GridError::TooLarge { cols, rows, cell_size });
        }
        Ok(Self { cols, rows, cell_size })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Total drawing width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.cols * self.cell_size
    }

    /// Total drawing height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.rows * self.cell_size
    }

    /// Drawing bounds in top-left pixel space.
    pub fn pixel_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.pixel_width() as f64, self.pixel_height() as f64)
    }

    /// Check whether a cell lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    /// Top-left pixel corner of a cell.
    pub fn cell_origin(&self, cell: Cell) -> Point {
        let size = self.cell_size as f64;
        Point::new(cell.x as f64 * size, cell.y as f64 * size)
    }

    /// Pixel rectangle covered by a cell.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let size = self.cell_size as f64;
        Rect::from_origin_size(self.cell_origin(cell), (size, size))
    }

    /// The `cols + 1` vertical boundary lines, left to right.
    pub fn vertical_lines(&self) -> impl Iterator<Item = Line> + '_ {
        let height = self.pixel_height() as f64;
        let size = self.cell_size as f64;
        (0..=self.cols).map(move |i| {
            let x = i as f64 * size;
            Line::new((x, 0.0), (x, height))
        })
    }

    /// The `rows + 1` horizontal boundary lines, top to bottom.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = Line> + '_ {
        let width = self.pixel_width() as f64;
        let size = self.cell_size as f64;
        (0..=self.rows).map(move |j| {
            let y = j as f64 * size;
            Line::new((0.0, y), (width, y))
        })
    }
}

/// The grid, its cursor and the shapes placed so far.
///
/// The shape list is append-only: shapes are never removed or reordered, and
/// later shapes draw on top of earlier ones.
#[derive(Debug, Clone)]
pub struct GridModel {
    grid: Grid,
    cursor: Cell,
    shapes: Vec<Shape>,
}

impl GridModel {
    /// Create an empty model with the cursor at the top-left cell.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cursor: Cell::ORIGIN,
            shapes: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Placed shapes in insertion order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes stacked on a given cell, back to front.
    pub fn shapes_at(&self, cell: Cell) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |shape| shape.cell() == cell)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Move the cursor one cell, clamped to the grid.
    /// Returns false when the cursor was already at the boundary.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let Cell { x, y } = self.cursor;
        let next = match direction {
            Direction::Left => Cell::new(x.saturating_sub(1), y),
            Direction::Right => Cell::new((x + 1).min(self.grid.cols - 1), y),
            Direction::Up => Cell::new(x, y.saturating_sub(1)),
            Direction::Down => Cell::new(x, (y + 1).min(self.grid.rows - 1)),
        };
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    /// Append a shape at the cursor cell. Occupied cells simply stack.
    pub fn place_shape(&mut self, kind: ShapeKind) -> &Shape {
        let shape = Shape::new(kind, self.cursor);
        log::debug!("Placed {} at ({}, {})", kind.name(), self.cursor.x, self.cursor.y);
        self.shapes.push(shape);
        &self.shapes[self.shapes.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(cols: u32, rows: u32) -> GridModel {
        GridModel::new(Grid::new(cols, rows, 40).unwrap())
    }

    #[test]
    fn test_grid_rejects_zero_dimensions() {
        assert_eq!(Grid::new(0, 5, 40), Err(GridError::ZeroDimension("cols")));
        assert_eq!(Grid::new(5, 0, 40), Err(GridError::ZeroDimension("rows")));
        assert_eq!(Grid::new(5, 5, 0), Err(GridError::ZeroDimension("cell_size")));
    }

    #[test]
    fn test_grid_rejects_overflowing_size() {
        assert!(matches!(
            Grid::new(u32::MAX, 1, 2),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_grid_size_limited_to_exact_f32_coordinates() {
        let grid = Grid::new(MAX_PIXEL_EXTENT / 8, 1, 8).unwrap();
        assert_eq!(grid.pixel_width(), MAX_PIXEL_EXTENT);
        assert_eq!(grid.pixel_width() as f32 as u32, grid.pixel_width());

        assert!(matches!(
            Grid::new(MAX_PIXEL_EXTENT / 8 + 1, 1, 8),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            Grid::new(1, MAX_PIXEL_EXTENT + 1, 1),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_pixel_dimensions() {
        let grid = Grid::new(20, 15, 40).unwrap();
        assert_eq!(grid.pixel_width(), 800);
        assert_eq!(grid.pixel_height(), 600);
    }

    #[test]
    fn test_cell_rect() {
        let grid = Grid::new(20, 15, 40).unwrap();
        let rect = grid.cell_rect(Cell::new(2, 3));
        assert!((rect.x0 - 80.0).abs() < f64::EPSILON);
        assert!((rect.y0 - 120.0).abs() < f64::EPSILON);
        assert!((rect.width() - 40.0).abs() < f64::EPSILON);
        assert!((rect.height() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_line_counts() {
        let grid = Grid::new(4, 3, 10).unwrap();
        let vertical: Vec<_> = grid.vertical_lines().collect();
        let horizontal: Vec<_> = grid.horizontal_lines().collect();
        assert_eq!(vertical.len(), 5);
        assert_eq!(horizontal.len(), 4);
        assert!((vertical[4].p0.x - 40.0).abs() < f64::EPSILON);
        assert!((vertical[4].p1.y - 30.0).abs() < f64::EPSILON);
        assert!((horizontal[3].p0.y - 30.0).abs() < f64::EPSILON);
        assert!((horizontal[3].p1.x - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cursor_starts_at_origin() {
        assert_eq!(model(3, 3).cursor(), Cell::ORIGIN);
    }

    #[test]
    fn test_cursor_clamps_at_boundaries() {
        let mut model = model(3, 2);
        assert!(!model.move_cursor(Direction::Left));
        assert!(!model.move_cursor(Direction::Up));
        assert_eq!(model.cursor(), Cell::ORIGIN);

        assert!(model.move_cursor(Direction::Right));
        assert!(model.move_cursor(Direction::Right));
        assert!(!model.move_cursor(Direction::Right));
        assert_eq!(model.cursor(), Cell::new(2, 0));

        assert!(model.move_cursor(Direction::Down));
        assert!(!model.move_cursor(Direction::Down));
        assert_eq!(model.cursor(), Cell::new(2, 1));
    }

    #[test]
    fn test_cursor_stays_in_bounds_for_any_sequence() {
        let mut model = model(4, 3);
        let directions = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        for step in 0..200usize {
            let direction = directions[(step * 7 + step / 3) % 4];
            model.move_cursor(direction);
            let cursor = model.cursor();
            assert!(model.grid().contains(cursor), "cursor escaped at {:?}", cursor);
        }
    }

    #[test]
    fn test_single_cell_grid_never_moves() {
        let mut model = model(1, 1);
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            assert!(!model.move_cursor(direction));
        }
        assert_eq!(model.cursor(), Cell::ORIGIN);
    }

    #[test]
    fn test_place_shapes_appends_in_order() {
        let mut model = model(5, 5);
        model.place_shape(ShapeKind::Square);
        model.move_cursor(Direction::Right);
        model.place_shape(ShapeKind::Triangle);
        model.move_cursor(Direction::Down);
        model.place_shape(ShapeKind::Square);

        let placed: Vec<_> = model.shapes().iter().map(|s| (s.kind(), s.cell())).collect();
        assert_eq!(
            placed,
            vec![
                (ShapeKind::Square, Cell::new(0, 0)),
                (ShapeKind::Triangle, Cell::new(1, 0)),
                (ShapeKind::Square, Cell::new(1, 1)),
            ]
        );
    }

    #[test]
    fn test_place_on_occupied_cell_stacks() {
        let mut model = model(2, 2);
        model.place_shape(ShapeKind::Square);
        model.place_shape(ShapeKind::Triangle);
        model.place_shape(ShapeKind::Square);

        assert_eq!(model.len(), 3);
        let stacked: Vec<_> = model.shapes_at(Cell::ORIGIN).map(|s| s.kind()).collect();
        assert_eq!(
            stacked,
            vec![ShapeKind::Square, ShapeKind::Triangle, ShapeKind::Square]
        );
        assert_eq!(model.shapes_at(Cell::new(1, 1)).count(), 0);
    }
}
