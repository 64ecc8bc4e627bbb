//! Application window and event loop management.

mod input;
mod render;

use std::sync::Arc;
use std::time::Instant;

use camdebug_core::{CamDebugError, CameraSample, Options, PollOutcome, SampleSource};
use camdebug_render::RenderEngine;
use camdebug_ui::{EguiIntegration, PollState, ViewerControls};
use winit::window::Window;

use crate::scene::SceneBuffers;

/// The viewer application state.
pub struct App {
    pub(super) options: Options,
    pub(super) source: SampleSource,
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) egui: Option<EguiIntegration>,
    pub(super) scene: Option<SceneBuffers>,
    // Latest successfully parsed sample
    pub(super) sample: Option<CameraSample>,
    pub(super) last_update: Option<Instant>,
    pub(super) samples_read: u64,
    // The last poll failed; the sample is drawn dimmed
    pub(super) stale: bool,
    pub(super) controls: ViewerControls,
    // Geometry must be rebuilt before the next frame
    pub(super) scene_dirty: bool,
    pub(super) camera_fitted: bool,
    pub(super) close_requested: bool,
    pub(super) fatal_error: Option<CamDebugError>,
    // Mouse state for camera control
    pub(super) mouse_pos: (f64, f64),
    pub(super) left_mouse_down: bool,
    pub(super) right_mouse_down: bool,
    pub(super) shift_down: bool,
    // Whether the current drag started over the 3D view rather than the panel
    pub(super) drag_in_viewport: bool,
    // Screenshot state
    pub(super) screenshot_pending: bool,
    pub(super) screenshot_counter: u32,
}

impl App {
    /// Creates a new application for `options`. No window is opened until the
    /// event loop resumes.
    pub fn new(options: Options) -> Self {
        let source = SampleSource::new(options.data_path.clone(), options.poll_interval());
        Self {
            options,
            source,
            window: None,
            engine: None,
            egui: None,
            scene: None,
            sample: None,
            last_update: None,
            samples_read: 0,
            stale: false,
            controls: ViewerControls::default(),
            scene_dirty: true,
            camera_fitted: false,
            close_requested: false,
            fatal_error: None,
            mouse_pos: (0.0, 0.0),
            left_mouse_down: false,
            right_mouse_down: false,
            shift_down: false,
            drag_in_viewport: false,
            screenshot_pending: false,
            screenshot_counter: 0,
        }
    }

    /// Polls the log if a tick is due. Returns true if a poll happened.
    pub(super) fn poll_source(&mut self, now: Instant) -> bool {
        if self.controls.paused {
            return false;
        }

        match self.source.poll(now) {
            PollOutcome::NotDue => return false,
            PollOutcome::Unchanged => {}
            PollOutcome::Empty => {
                self.stale = false;
            }
            PollOutcome::Updated(sample) => {
                if self.sample.is_none() {
                    // First sample: frame it together with the axes
                    self.camera_fitted = false;
                }
                if self.sample != Some(sample) || self.stale {
                    self.scene_dirty = true;
                }
                self.sample = Some(sample);
                self.last_update = Some(now);
                self.samples_read += 1;
                self.stale = false;
            }
            PollOutcome::Failed(_) => {
                self.stale = true;
            }
        }
        true
    }

    /// The state shown in the status panel.
    pub(super) fn poll_state(&self) -> PollState {
        if self.controls.paused {
            PollState::Paused
        } else if self.stale {
            PollState::Error
        } else if self.sample.is_none() {
            PollState::Waiting
        } else {
            PollState::Live
        }
    }

    /// Pauses or resumes polling. Resuming polls on the next tick.
    pub(super) fn set_paused(&mut self, paused: bool) {
        if self.controls.paused == paused {
            return;
        }
        self.controls.paused = paused;
        if !paused {
            self.source.timer_mut().reset();
        }
        log::info!("polling {}", if paused { "paused" } else { "resumed" });
    }

    /// Requests a screenshot with an auto-generated filename.
    pub(super) fn request_screenshot(&mut self) {
        self.screenshot_pending = true;
    }

    /// Records an error that ends the event loop; [`crate::run`] returns it.
    pub(super) fn fail(&mut self, err: CamDebugError) {
        log::error!("{err}");
        self.fatal_error = Some(err);
        self.close_requested = true;
    }

    pub(super) fn take_fatal_error(&mut self) -> Option<CamDebugError> {
        self.fatal_error.take()
    }

    pub(super) fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camdebug_ui::PanelResponse;
    use std::io::Write;
    use std::time::Duration;

    fn app_for(file: &tempfile::NamedTempFile) -> App {
        App::new(Options {
            data_path: file.path().to_path_buf(),
            poll_interval_ms: 50,
            ..Options::default()
        })
    }

    #[test]
    fn test_waiting_until_first_sample() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut app = app_for(&file);
        assert_eq!(app.poll_state(), PollState::Waiting);

        assert!(app.poll_source(Instant::now()));
        assert!(app.sample.is_none());
        assert_eq!(app.poll_state(), PollState::Waiting);
    }

    #[test]
    fn test_failure_keeps_last_sample_and_marks_stale() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "right: 1 0 0 up: 0 1 0").unwrap();
        file.flush().unwrap();

        let mut app = app_for(&file);
        let start = Instant::now();
        assert!(app.poll_source(start));
        assert_eq!(app.poll_state(), PollState::Live);
        assert_eq!(app.samples_read, 1);
        let sample = app.sample.unwrap();

        writeln!(file, "right: 1 0").unwrap();
        file.flush().unwrap();
        app.scene_dirty = false;
        assert!(app.poll_source(start + Duration::from_millis(50)));
        assert_eq!(app.poll_state(), PollState::Error);
        assert_eq!(app.sample, Some(sample));
        assert!(!app.scene_dirty);

        writeln!(file, "right: 1 0 0 up: 0 0 1").unwrap();
        file.flush().unwrap();
        assert!(app.poll_source(start + Duration::from_millis(100)));
        assert_eq!(app.poll_state(), PollState::Live);
        assert!(app.scene_dirty);
        assert_eq!(app.samples_read, 2);
    }

    #[test]
    fn test_unchanged_log_is_not_a_new_sample() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "right: 1 0 0 up: 0 1 0").unwrap();
        file.flush().unwrap();

        let mut app = app_for(&file);
        let start = Instant::now();
        for i in 0..5 {
            assert!(app.poll_source(start + Duration::from_millis(50 * i)));
        }
        assert_eq!(app.samples_read, 1);
        assert_eq!(app.last_update, Some(start));
        assert_eq!(app.poll_state(), PollState::Live);
    }

    #[test]
    fn test_poll_respects_interval_and_pause() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a 1 2 3 b 4 5 6").unwrap();
        file.flush().unwrap();

        let mut app = app_for(&file);
        let start = Instant::now();
        assert!(app.poll_source(start));
        assert!(!app.poll_source(start + Duration::from_millis(10)));

        app.set_paused(true);
        assert_eq!(app.poll_state(), PollState::Paused);
        assert!(!app.poll_source(start + Duration::from_millis(60)));

        app.set_paused(false);
        assert!(app.poll_source(start + Duration::from_millis(61)));
    }

    #[test]
    fn test_panel_resume_resets_timer_before_drawing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a 1 2 3 b 4 5 6").unwrap();
        file.flush().unwrap();

        let mut app = app_for(&file);
        let start = Instant::now();
        assert!(app.poll_source(start));
        app.set_paused(true);
        app.camera_fitted = true;

        // The checkbox flips the flag while the panel is built
        app.controls.paused = false;
        let response = PanelResponse {
            refit_requested: true,
            ..PanelResponse::default()
        };
        app.apply_panel_response(&response, true);

        assert_eq!(app.poll_state(), PollState::Live);
        assert!(!app.camera_fitted);
        assert!(app.poll_source(start + Duration::from_millis(1)));
    }

    #[test]
    fn test_missing_file_is_error_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(Options {
            data_path: dir.path().join("missing.txt"),
            ..Options::default()
        });
        assert!(app.poll_source(Instant::now()));
        assert_eq!(app.poll_state(), PollState::Error);
        assert!(app.source.last_error().is_some());
    }
}
