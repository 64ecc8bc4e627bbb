//! Headless rendering integration tests.
//!
//! These need a GPU adapter (real or software fallback). Without one, engine
//! creation fails with `RenderError` and each test returns early after
//! printing why. Capture and save failures are real failures.

use camdebug::*;

fn render_or_skip(
    options: &Options,
    sample: Option<&CameraSample>,
    width: u32,
    height: u32,
) -> Option<Vec<u8>> {
    match render_to_image(options, sample, width, height) {
        Ok(pixels) => Some(pixels),
        Err(CamDebugError::RenderError(e)) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            None
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
}

fn count_pixels(pixels: &[u8], pred: impl Fn(&[u8]) -> bool) -> usize {
    pixels.chunks_exact(4).filter(|px| pred(px)).count()
}

fn is_reddish(px: &[u8]) -> bool {
    px[0] > 200 && px[1] < 80 && px[2] < 80
}

fn is_bluish(px: &[u8]) -> bool {
    px[2] > 200 && px[0] < 80 && px[1] < 80
}

#[test]
fn headless_axes_are_drawn() {
    let options = Options::default();
    let Some(pixels) = render_or_skip(&options, None, 320, 240) else {
        return;
    };
    assert_eq!(pixels.len(), 320 * 240 * 4);

    // x axis is blue, y axis is red, over a white background
    assert!(count_pixels(&pixels, is_bluish) > 0, "x axis not visible");
    assert!(count_pixels(&pixels, is_reddish) > 0, "y axis not visible");
    let white = count_pixels(&pixels, |px| px[..3] == [255, 255, 255]);
    assert!(white > pixels.len() / 8, "background should dominate");
}

#[test]
fn headless_empty_scene_is_uniform_background() {
    let options = Options {
        show_axes: false,
        background_color: Vec3::new(0.0, 0.0, 0.0),
        ..Options::default()
    };
    let Some(pixels) = render_or_skip(&options, None, 64, 48) else {
        return;
    };
    assert!(pixels.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn headless_sample_vectors_change_the_image() {
    let options = Options {
        show_axes: false,
        ..Options::default()
    };
    let sample = parse_line("right: 1 0 0 up: 0 1 0").unwrap();
    let Some(pixels) = render_or_skip(&options, Some(&sample), 200, 150) else {
        return;
    };

    let non_background = count_pixels(&pixels, |px| px[..3] != [255, 255, 255]);
    assert!(non_background > 0, "sample vectors not visible");
}

#[test]
fn headless_render_to_file_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.png");
    let sample = CameraSample::new(Vec3::new(0.5, 0.2, 0.1), Vec3::new(0.0, 0.0, 1.0));

    match render_to_file(&path, &Options::default(), Some(&sample), 96, 64) {
        Ok(()) => {}
        Err(CamDebugError::RenderError(e)) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            return;
        }
        Err(e) => panic!("unexpected error: {e}"),
    }

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (96, 64));
}

#[test]
fn headless_unsupported_extension_is_a_capture_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.bmp");

    match render_to_file(&path, &Options::default(), None, 32, 32) {
        Err(CamDebugError::RenderError(e)) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
        }
        Err(CamDebugError::CaptureError(e)) => assert!(e.contains("snapshot.bmp")),
        other => panic!("expected a capture error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn headless_rejects_zero_size() {
    let err = render_to_image(&Options::default(), None, 0, 10).unwrap_err();
    assert!(matches!(err, CamDebugError::InvalidOption(_)));
}

#[test]
fn headless_rejects_oversized_image() {
    let err = render_to_image(&Options::default(), None, 100_000, 600).unwrap_err();
    assert!(matches!(err, CamDebugError::InvalidOption(_)), "{err}");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.png");
    let err = render_to_file(&path, &Options::default(), None, 600, 100_000).unwrap_err();
    assert!(matches!(err, CamDebugError::InvalidOption(_)), "{err}");
}
