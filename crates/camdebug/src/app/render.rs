use std::path::PathBuf;

use camdebug_render::{save_image, ProjectionMode};
use camdebug_ui::{build_status_panel, PanelResponse, StatusInfo};
use egui_wgpu::ScreenDescriptor;

use super::App;

impl App {
    /// Renders a single frame: the scene, then the status panel on top.
    pub(super) fn render(&mut self) {
        let state = self.poll_state();
        let was_paused = self.controls.paused;

        // Build the UI first; it may change options for this frame
        let (response, egui_output) = {
            let (Some(engine), Some(egui), Some(window)) =
                (&self.engine, &mut self.egui, &self.window)
            else {
                return;
            };
            if engine.surface.is_none() {
                return;
            }
            egui.begin_frame(window);
            let info = StatusInfo {
                data_path: self.source.path(),
                state,
                since_update: self.last_update.map(|t| t.elapsed()),
                sample: self.sample,
                last_error: self.source.last_error(),
                samples_read: self.samples_read,
            };
            let response = build_status_panel(
                &egui.context,
                &info,
                &mut self.options,
                &mut self.controls,
            );
            (response, egui.end_frame(window))
        };
        self.apply_panel_response(&response, was_paused);

        let (Some(engine), Some(egui), Some(window), Some(scene)) =
            (&mut self.engine, &mut self.egui, &self.window, &mut self.scene)
        else {
            return;
        };
        engine.camera.set_projection_mode(if self.controls.orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        });

        if self.scene_dirty {
            scene.update_geometry(&engine.queue, &self.options, self.sample.as_ref());
            self.scene_dirty = false;
        }
        scene.set_stale(&engine.queue, self.stale);
        if !self.camera_fitted {
            scene.fit_camera(&mut engine.camera);
            self.camera_fitted = true;
        }
        engine.update_camera_uniforms();

        let Some(surface) = engine.surface.as_ref() else {
            return;
        };
        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine.reconfigure_surface();
                window.request_redraw();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of memory");
                self.close_requested = true;
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout");
                return;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("surface error: other");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        engine.render_lines(
            &mut encoder,
            &view,
            self.options.background_color,
            &scene.line_sets(),
        );

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [engine.width, engine.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        egui.render(
            &engine.device,
            &engine.queue,
            &mut encoder,
            &view,
            &screen_descriptor,
            egui_output,
        );

        engine.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();

        if std::mem::take(&mut self.screenshot_pending) {
            self.save_screenshot();
        }
    }

    /// Applies what the panel asked for. Runs before the surface is touched,
    /// so a lost frame never drops a pause or an option change.
    pub(super) fn apply_panel_response(&mut self, response: &PanelResponse, was_paused: bool) {
        if self.controls.paused != was_paused {
            // The checkbox already flipped the flag; apply the side effects
            let paused = self.controls.paused;
            self.controls.paused = was_paused;
            self.set_paused(paused);
        }
        if response.options_changed {
            self.scene_dirty = true;
        }
        if response.up_changed {
            if let Some(engine) = &mut self.engine {
                engine.camera.set_up_direction(self.options.up_direction);
            }
            self.scene_dirty = true;
            self.camera_fitted = false;
        }
        if response.refit_requested {
            self.camera_fitted = false;
        }
        if response.screenshot_requested {
            self.screenshot_pending = true;
        }
    }

    /// Saves the 3D view (without the panel) as `camdebug_NNNN.png`.
    fn save_screenshot(&mut self) {
        let (Some(engine), Some(scene)) = (&mut self.engine, &self.scene) else {
            return;
        };

        let path = PathBuf::from(format!("camdebug_{:04}.png", self.screenshot_counter));
        self.screenshot_counter += 1;

        let pixels = match engine.capture_frame(self.options.background_color, &scene.line_sets())
        {
            Ok(pixels) => pixels,
            Err(e) => {
                log::warn!("screenshot failed: {e}");
                return;
            }
        };
        if let Err(e) = save_image(&path, &pixels, engine.width, engine.height) {
            log::warn!("failed to save {}: {e}", path.display());
        }
    }
}
