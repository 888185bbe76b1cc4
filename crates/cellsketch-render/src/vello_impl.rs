//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use cellsketch_core::grid::{Grid, GridModel};
use kurbo::{Affine, BezPath, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Render the grid's boundary lines as one batched path.
    fn render_grid_lines(&mut self, grid: &Grid, transform: Affine, color: Color) {
        let stroke = Stroke::new(1.0);
        let mut path = BezPath::new();
        for line in grid.vertical_lines().chain(grid.horizontal_lines()) {
            path.move_to(line.p0);
            path.line_to(line.p1);
        }
        self.scene.stroke(&stroke, transform, color, None, &path);
    }

    /// Highlight the cursor cell: translucent fill plus an outline.
    fn render_cursor(&mut self, model: &GridModel, transform: Affine, color: Color) {
        let rect = model.grid().cell_rect(model.cursor());
        let rgba = color.to_rgba8();
        let fill = Color::from_rgba8(rgba.r, rgba.g, rgba.b, 48);
        self.scene.fill(Fill::NonZero, transform, fill, None, &rect);

        let stroke = Stroke::new(2.0);
        self.scene.stroke(&stroke, transform, color, None, &rect);
    }

    fn render_shapes(&mut self, model: &GridModel, transform: Affine, color: Color) {
        let cell_size = model.grid().cell_size() as f64;
        for shape in model.shapes() {
            let path = shape.to_path(cell_size);
            self.scene.fill(Fill::NonZero, transform, color, None, &path);
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();

        let transform = ctx.transform();
        let grid = ctx.model.grid();

        let paper: Rect = grid.pixel_bounds();
        self.scene
            .fill(Fill::NonZero, transform, ctx.paper_color, None, &paper);

        // Cursor sits under the lines and shapes so stacked shapes stay visible
        self.render_cursor(ctx.model, transform, ctx.cursor_color);
        self.render_grid_lines(grid, transform, ctx.grid_color);
        self.render_shapes(ctx.model, transform, ctx.shape_color);
    }
}
