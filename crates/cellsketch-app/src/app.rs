//! Main application shell: window, event loop and frame rendering.

use cellsketch_core::{
    Command, CommandDispatcher, CommandOutcome, ConfigError, DestinationPicker, ExportOutcome,
    GridConfig, GridModel,
};
use cellsketch_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Size};
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{render_ui, UiAction, UiState, MENU_BAR_HEIGHT, STATUS_BAR_HEIGHT};

#[cfg(feature = "native")]
mod file_ops {
    use cellsketch_core::{DestinationPicker, ExportFormat};
    use std::path::PathBuf;

    /// Asks for an export destination with the native save dialog.
    pub struct DialogPicker;

    impl DestinationPicker for DialogPicker {
        fn pick_destination(&self, format: ExportFormat, suggested_name: &str) -> Option<PathBuf> {
            rfd::FileDialog::new()
                .set_title(format.dialog_title())
                .set_file_name(suggested_name)
                .add_filter(format.filter_name(), &[format.extension()])
                .save_file()
        }
    }
}

#[cfg(not(feature = "native"))]
mod file_ops {
    use cellsketch_core::{DestinationPicker, ExportFormat};
    use std::path::PathBuf;

    /// Without native dialogs every export is treated as cancelled.
    pub struct DialogPicker;

    impl DestinationPicker for DialogPicker {
        fn pick_destination(&self, format: ExportFormat, _suggested_name: &str) -> Option<PathBuf> {
            log::warn!("{}: no file dialog available in this build", format.dialog_title());
            None
        }
    }
}

/// Application errors that stop start-up.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub grid: GridConfig,
    /// Space left and right of the grid, in logical pixels.
    pub margin: u32,
    pub background_color: Color,
    /// Highlight for the cell under the cursor.
    pub cursor_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "CellSketch".to_string(),
            grid: GridConfig::default(),
            margin: 16,
            background_color: Color::from_rgba8(241, 245, 249, 255),
            cursor_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }
}

impl AppConfig {
    /// Default window settings around the given grid.
    pub fn with_grid(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Window width that fits the grid plus margins.
    pub fn width(&self) -> u32 {
        self.grid
            .cols
            .saturating_mul(self.grid.cell_size)
            .saturating_add(2 * self.margin)
    }

    /// Window height that fits the menu bar, the grid and the status bar.
    pub fn height(&self) -> u32 {
        let chrome = (MENU_BAR_HEIGHT + STATUS_BAR_HEIGHT) as u32 + self.margin;
        self.grid
            .rows
            .saturating_mul(self.grid.cell_size)
            .saturating_add(chrome)
    }

    /// Where the grid's top-left corner sits in the window, in logical pixels.
    pub fn grid_origin(&self) -> Point {
        Point::new(self.margin as f64, MENU_BAR_HEIGHT as f64)
    }
}

/// The model, the command dispatcher and the UI state that mirrors them.
struct Editor {
    model: GridModel,
    dispatcher: CommandDispatcher,
    ui_state: UiState,
}

impl Editor {
    fn new(model: GridModel, dispatcher: CommandDispatcher) -> Self {
        let mut editor = Self {
            ui_state: UiState::new(dispatcher.pdf_available()),
            model,
            dispatcher,
        };
        editor.sync_ui_state();
        editor
    }

    /// Run a command. Export failures are logged and shown in the UI.
    fn apply(&mut self, command: Command, picker: &dyn DestinationPicker) {
        match self.dispatcher.dispatch(&mut self.model, command, picker) {
            Ok(CommandOutcome::Exported(ExportOutcome::Saved(_))) => {
                self.ui_state.error = None;
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("{}: {}", err.title(), err);
                self.ui_state.show_error(&err);
            }
        }
        self.sync_ui_state();
    }

    fn handle_ui_action(&mut self, action: UiAction, picker: &dyn DestinationPicker) {
        match action {
            UiAction::Run(command) => self.apply(command, picker),
            UiAction::DismissError => self.ui_state.error = None,
        }
    }

    fn sync_ui_state(&mut self) {
        let grid = self.model.grid();
        self.ui_state.grid_size = (grid.cols(), grid.rows());
        self.ui_state.cursor = self.model.cursor();
        self.ui_state.shape_count = self.model.len();
    }
}

/// Runtime state that exists once the window is up.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    modifiers: ModifiersState,

    // Rendering
    vello_renderer: vello::Renderer,
    grid_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    editor: Editor,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create the application, validating the configured grid.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        Self::with_dispatcher(config, CommandDispatcher::default())
    }

    /// Create the application with an explicit dispatcher.
    pub fn with_dispatcher(
        config: AppConfig,
        dispatcher: CommandDispatcher,
    ) -> Result<Self, ConfigError> {
        let grid = config.grid.build_grid()?;
        Ok(Self {
            config,
            editor: Editor::new(GridModel::new(grid), dispatcher),
            state: None,
            render_cx: None,
        })
    }

    /// The drawing being edited.
    pub fn model(&self) -> &GridModel {
        &self.editor.model
    }

    /// Run the application until the window is closed.
    pub async fn run(config: AppConfig) -> Result<(), AppError> {
        let mut app = App::new(config)?;
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Finish initialization after the surface is created.
    fn finish_init(
        &mut self,
        window: Arc<Window>,
        surface: RenderSurface<'static>,
    ) -> RenderResult<()> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| RendererError::InitFailed("render context missing".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{e:?}")))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let grid = self.editor.model.grid();
        log::info!(
            "CellSketch initialized - {}x{} surface, {}x{} grid of {}px cells",
            surface.config.width,
            surface.config.height,
            grid.cols(),
            grid.rows(),
            grid.cell_size()
        );
        if !self.editor.dispatcher.pdf_available() {
            log::warn!("PDF export unavailable: built without the `pdf` feature");
        }

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            modifiers: ModifiersState::empty(),
            vello_renderer,
            grid_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
        });

        window.request_redraw();
        Ok(())
    }
}

impl AppState {
    /// Build the grid scene, run egui and present one frame.
    ///
    /// Returns the UI action triggered during this frame, if any.
    fn render_frame(
        &mut self,
        render_cx: &vello::util::RenderContext,
        editor: &mut Editor,
        config: &AppConfig,
    ) -> Option<UiAction> {
        // Run egui first so its action reaches the model before drawing
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            action = render_ui(ctx, &mut editor.ui_state);
        });
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let render_ctx = RenderContext::new(&editor.model, Size::new(width as f64, height as f64))
            .with_scale_factor(self.window.scale_factor())
            .with_origin(config.grid_origin())
            .with_background(config.background_color)
            .with_cursor_color(config.cursor_color);
        self.grid_renderer.build_scene(&render_ctx);
        let base_color = self.grid_renderer.background_color(&render_ctx);
        let scene = self.grid_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match self.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return action;
            }
        };

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding Rgba8Unorm target
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = self.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("{}", RendererError::RenderFailed(format!("{e:?}")));
            return action;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter.copy(
                device,
                &mut blit_encoder,
                &render_texture_view,
                &surface_view,
            );
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load, // Keep Vello content
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        action
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width(), self.config.height()));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width(), self.config.height())
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = match pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        )) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{}", RendererError::Surface(format!("{e:?}")));
                event_loop.exit();
                return;
            }
        };

        // SAFETY: the surface borrows `window`, which AppState keeps alive in
        // the same struct for as long as the surface exists.
        let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
        if let Err(e) = self.finish_init(window, surface) {
            log::error!("{}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                let action = state.render_frame(render_cx, &mut self.editor, &self.config);
                if let Some(action) = action {
                    self.editor
                        .handle_ui_action(action, &file_ops::DialogPicker);
                    state.window.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed || state.egui_ctx.wants_keyboard_input() {
                    return;
                }
                if event.state != ElementState::Pressed {
                    return;
                }

                let ctrl = state.modifiers.control_key() || state.modifiers.super_key();
                let Some(command) = ShortcutRegistry::command_for_key(&event.logical_key, ctrl)
                else {
                    return;
                };
                // Held arrow keys keep moving; everything else fires once per press
                if event.repeat && command.direction().is_none() {
                    return;
                }

                log::debug!("Key {:?} -> {:?}", event.logical_key, command);
                self.editor.apply(command, &file_ops::DialogPicker);
                state.window.request_redraw();
            }

            _ => {}
        }
    }
}
