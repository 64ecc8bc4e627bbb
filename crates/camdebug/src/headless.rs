//! Headless rendering API.
//!
//! Renders one frame of the axes and a sample to an image buffer or file
//! without opening a window. Used by `camdebug --snapshot` and by tests.

use std::path::Path;

use camdebug_core::{CamDebugError, CameraSample, Options, Result};
use camdebug_render::{check_target_size, RenderEngine, RenderError};
use pollster::FutureExt;

use crate::scene::SceneBuffers;

/// Renders the axes and `sample` to a file.
///
/// The format follows the extension (`.png`, `.jpg` or `.jpeg`). The camera
/// is fitted to the drawn geometry.
///
/// # Example
/// ```no_run
/// use camdebug::{read_last_sample, render_to_file, Options};
/// use std::path::Path;
///
/// let options = Options::default();
/// let sample = read_last_sample(&options.data_path).unwrap();
/// render_to_file(Path::new("camera.png"), &options, sample.as_ref(), 800, 600).unwrap();
/// ```
pub fn render_to_file(
    path: &Path,
    options: &Options,
    sample: Option<&CameraSample>,
    width: u32,
    height: u32,
) -> Result<()> {
    let data = render_to_image(options, sample, width, height)?;
    camdebug_render::save_image(path, &data, width, height).map_err(|e| {
        CamDebugError::CaptureError(format!("failed to save {}: {e}", path.display()))
    })
}

/// Renders the axes and `sample` to a raw RGBA pixel buffer.
///
/// The buffer holds `width * height * 4` bytes, row by row from the top-left.
/// With no sample only the axes are drawn. Sizes outside what the graphics
/// device supports are rejected as [`CamDebugError::InvalidOption`].
pub fn render_to_image(
    options: &Options,
    sample: Option<&CameraSample>,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    options.validate()?;
    if width == 0 || height == 0 {
        return Err(CamDebugError::InvalidOption(format!(
            "image size must be non-zero, got {width}x{height}"
        )));
    }

    check_target_size(width, height, &RenderEngine::required_limits()).map_err(size_error)?;

    let mut engine = RenderEngine::new_headless(width, height)
        .block_on()
        .map_err(|e| match e {
            RenderError::TextureTooLarge { .. } => size_error(e),
            e => CamDebugError::RenderError(format!("failed to create headless engine: {e}")),
        })?;
    engine.camera.set_up_direction(options.up_direction);

    let mut scene = SceneBuffers::new(&engine);
    scene.update_geometry(&engine.queue, options, sample);
    scene.set_stale(&engine.queue, false);
    scene.fit_camera(&mut engine.camera);

    engine
        .capture_frame(options.background_color, &scene.line_sets())
        .map_err(|e| CamDebugError::CaptureError(format!("failed to capture frame: {e}")))
}

fn size_error(e: RenderError) -> CamDebugError {
    CamDebugError::InvalidOption(format!("image size: {e}"))
}
