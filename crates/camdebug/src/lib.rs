//! camdebug: a live 3D view of camera orientation vectors.
//!
//! The viewer polls a text log that another program appends to, parses the
//! last line into two vectors and draws them next to the world axes. The log
//! format is one sample per line:
//!
//! ```text
//! right: 0.98 0.00 -0.17 up: 0.00 1.00 0.00
//! ```
//!
//! Fields 1-3 are `u` and fields 5-7 are `v`; fields 0 and 4 are labels.
//!
//! # Quick Start
//!
//! ```no_run
//! use camdebug::Options;
//!
//! fn main() -> camdebug::Result<()> {
//!     let options = Options {
//!         data_path: "camera_out.txt".into(),
//!         ..Options::default()
//!     };
//!     camdebug::run(options)
//! }
//! ```
//!
//! # Headless rendering
//!
//! [`render_to_image`] and [`render_to_file`] draw a single frame without a
//! window, for snapshots and tests.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Pixel sizes and mouse deltas are converted between integer and float freely
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod app;
mod headless;
mod scene;

pub use camdebug_core::{
    parse_line, read_last_line, read_last_sample, AxisDirection, CamDebugError, CameraSample,
    Options, ParseError, Result, VectorLayout, Vec3,
};
pub use headless::{render_to_file, render_to_image};

use app::App;
use winit::event_loop::EventLoop;

/// Opens the viewer window and runs until it is closed.
///
/// # Errors
///
/// Returns an error if `options` are invalid, or if the window or GPU device
/// cannot be created.
pub fn run(options: Options) -> Result<()> {
    options.validate()?;
    log::info!(
        "watching {} every {} ms",
        options.data_path.display(),
        options.poll_interval_ms
    );

    let event_loop = EventLoop::new()
        .map_err(|e| CamDebugError::RenderError(format!("failed to create event loop: {e}")))?;
    let mut app = App::new(options);

    event_loop
        .run_app(&mut app)
        .map_err(|e| CamDebugError::RenderError(format!("event loop error: {e}")))?;

    match app.take_fatal_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
