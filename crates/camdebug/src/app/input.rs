use std::sync::Arc;
use std::time::Instant;

use camdebug_core::{CamDebugError, Result};
use camdebug_render::RenderEngine;
use camdebug_ui::EguiIntegration;
use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::App;
use crate::scene::SceneBuffers;

/// Radians of orbit per pixel of mouse motion.
const ORBIT_SPEED: f32 = 0.01;
/// Pan distance per pixel, relative to the distance to the target.
const PAN_SPEED: f32 = 0.002;

impl App {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(format!("camdebug - {}", self.options.data_path.display()))
            .with_inner_size(LogicalSize::new(
                self.options.window_width,
                self.options.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| CamDebugError::RenderError(format!("failed to create window: {e}")))?,
        );

        let mut engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .map_err(|e| {
                CamDebugError::RenderError(format!("failed to create render engine: {e}"))
            })?;
        engine.camera.set_up_direction(self.options.up_direction);

        let egui = EguiIntegration::new(&engine.device, engine.color_format(), &window);
        let scene = SceneBuffers::new(&engine);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.egui = Some(egui);
        self.scene = Some(scene);
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Escape => {
                self.close_requested = true;
            }
            KeyCode::KeyR => {
                self.camera_fitted = false;
            }
            KeyCode::KeyP => {
                self.set_paused(!self.controls.paused);
            }
            KeyCode::KeyS => {
                self.request_screenshot();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see every event first
        let egui_consumed = if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            egui.handle_event(window, &event)
        } else {
            false
        };
        let egui_wants_pointer = self.egui.as_ref().is_some_and(EguiIntegration::wants_pointer);
        let egui_wants_keyboard = self
            .egui
            .as_ref()
            .is_some_and(EguiIntegration::wants_keyboard);

        // Physical button state is tracked even when egui consumes the event,
        // so a release over the panel does not leave a button stuck down.
        match &event {
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left | MouseButton::Right, ElementState::Pressed) => {
                    if !self.left_mouse_down && !self.right_mouse_down {
                        self.drag_in_viewport = !egui_wants_pointer;
                    }
                    if *button == MouseButton::Left {
                        self.left_mouse_down = true;
                    } else {
                        self.right_mouse_down = true;
                    }
                }
                (MouseButton::Left, ElementState::Released) => {
                    self.left_mouse_down = false;
                }
                (MouseButton::Right, ElementState::Released) => {
                    self.right_mouse_down = false;
                }
                _ => {}
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            _ => {}
        }

        let mut redraw = true;
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                    log::debug!("resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                redraw = false;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = (position.x - self.mouse_pos.0) as f32;
                let delta_y = (position.y - self.mouse_pos.1) as f32;
                self.mouse_pos = (position.x, position.y);

                let dragging = (self.left_mouse_down || self.right_mouse_down)
                    && self.drag_in_viewport;
                redraw = dragging || egui_wants_pointer;

                if dragging {
                    if let Some(engine) = &mut self.engine {
                        let camera = &mut engine.camera;
                        if self.right_mouse_down || self.shift_down {
                            let scale = camera.position.distance(camera.target) * PAN_SPEED;
                            camera.pan(-delta_x * scale, delta_y * scale);
                        } else {
                            camera.orbit(delta_x * ORBIT_SPEED, delta_y * ORBIT_SPEED);
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !egui_consumed && !egui_wants_pointer {
                    if let Some(engine) = &mut self.engine {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                        };
                        engine.camera.zoom(scroll);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let for_viewer = !egui_consumed && !egui_wants_keyboard;
                if for_viewer && event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.handle_key(code);
                    }
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        } else if redraw {
            self.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.close_requested {
            event_loop.exit();
            return;
        }

        // Redraw after every poll so the "last update" age stays current
        if self.poll_source(Instant::now()) {
            self.request_redraw();
        }

        match self.source.timer().next_deadline() {
            Some(deadline) if !self.controls.paused => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::debug!("viewer closed after {} samples", self.samples_read);
    }
}
