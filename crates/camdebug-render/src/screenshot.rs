//! Saving captured frames to image files.

use std::path::Path;

use image::{ImageBuffer, Rgba};
use thiserror::Error;

/// Saves raw RGBA pixel data to an image file.
///
/// # Arguments
/// * `path` - Output path (supports .png, .jpg, .jpeg)
/// * `data` - RGBA pixel data (4 bytes per pixel, top row first)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
/// Returns an error if the file cannot be written or format is unsupported.
pub fn save_image(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, data.to_vec())
        .ok_or(ScreenshotError::InvalidImageData)?;

    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // Convert to RGB for JPEG (no alpha)
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(ScreenshotError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved {width}x{height} image to {}", path.display());
    Ok(())
}

/// Screenshot-related errors.
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// Invalid image data (wrong size or format).
    #[error("invalid image data")]
    InvalidImageData,

    /// Unsupported file format.
    #[error("unsupported image format: '{0}' (expected png, jpg or jpeg)")]
    UnsupportedFormat(String),

    /// Image encoding/saving error.
    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),
}
