//! Glue that runs the status panel inside the viewer window.
//!
//! The panel is laid out once per frame between [`EguiIntegration::begin_frame`]
//! and [`EguiIntegration::end_frame`], then drawn over the finished 3D view.

use egui::{Context, FullOutput};
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use winit::event::WindowEvent;
use winit::window::Window;

/// The panel's UI context together with its winit input state and wgpu painter.
pub struct EguiIntegration {
    pub context: Context,
    pub state: EguiWinitState,
    pub renderer: EguiRenderer,
}

impl EguiIntegration {
    /// Sets up the panel for `window`, painting into targets of `output_format`.
    ///
    /// The light theme matches the viewer's default white background.
    #[must_use]
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        context.set_visuals(egui::Visuals::light());

        let state =
            EguiWinitState::new(context.clone(), context.viewport_id(), window, None, None, None);
        let renderer =
            EguiRenderer::new(device, output_format, egui_wgpu::RendererOptions::default());

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Feeds a window event to the panel. Returns true if a widget used it,
    /// in which case the camera controls should ignore it.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// True while the pointer is over the panel or dragging one of its widgets,
    /// so mouse drags belong to the panel rather than the orbit camera.
    #[must_use]
    pub fn wants_pointer(&self) -> bool {
        self.context.is_using_pointer() || self.context.is_pointer_over_area()
    }

    /// True while a panel field has keyboard focus; viewer shortcuts are off.
    #[must_use]
    pub fn wants_keyboard(&self) -> bool {
        self.context.wants_keyboard_input()
    }

    /// Starts laying out the panel with the input gathered since last frame.
    pub fn begin_frame(&mut self, window: &Window) {
        let input = self.state.take_egui_input(window);
        self.context.begin_pass(input);
    }

    /// Finishes the panel layout and applies cursor and clipboard changes.
    pub fn end_frame(&mut self, window: &Window) -> FullOutput {
        let output = self.context.end_pass();
        self.state
            .handle_platform_output(window, output.platform_output.clone());
        output
    }

    /// Paints the panel over `view`, keeping the 3D view already drawn there.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen: &ScreenDescriptor,
        output: FullOutput,
    ) {
        let primitives = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &primitives, screen);

        let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("status panel pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        // The painter takes a pass without a borrow on the encoder
        let mut pass = pass.forget_lifetime();
        self.renderer.render(&mut pass, &primitives, screen);
        drop(pass);

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
