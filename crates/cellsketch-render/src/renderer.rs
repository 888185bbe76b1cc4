//! Renderer trait abstraction.

use cellsketch_core::grid::GridModel;
use kurbo::{Affine, Point, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The grid model to render.
    pub model: &'a GridModel,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Where the grid's top-left corner sits, in logical pixels.
    pub origin: Point,
    /// Window background color.
    pub background_color: Color,
    /// Drawing area color behind the grid lines.
    pub paper_color: Color,
    /// Grid line color.
    pub grid_color: Color,
    /// Shape fill color.
    pub shape_color: Color,
    /// Cursor highlight color.
    pub cursor_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(model: &'a GridModel, viewport_size: Size) -> Self {
        Self {
            model,
            viewport_size,
            scale_factor: 1.0,
            origin: Point::ZERO,
            background_color: Color::from_rgba8(241, 245, 249, 255),
            paper_color: Color::WHITE,
            // lightgray, same as the exported grid
            grid_color: Color::from_rgba8(211, 211, 211, 255),
            shape_color: Color::BLACK,
            cursor_color: Color::from_rgba8(59, 130, 246, 255), // Blue
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set where the grid is drawn.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the cursor highlight color.
    pub fn with_cursor_color(mut self, color: Color) -> Self {
        self.cursor_color = color;
        self
    }

    /// Transform from grid pixel space to physical viewport pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * Affine::translate(self.origin.to_vec2())
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
