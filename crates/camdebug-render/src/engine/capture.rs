use glam::Vec3;

use super::RenderEngine;
use crate::error::{RenderError, RenderResult};
use crate::line_render::LineSetRenderData;

impl RenderEngine {
    /// Calculates bytes per row with proper alignment for wgpu buffer copies.
    pub(crate) fn aligned_bytes_per_row(width: u32) -> u32 {
        let bytes_per_pixel = 4u32; // RGBA8 / BGRA8
        let unaligned = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        unaligned.div_ceil(align) * align
    }

    /// Renders the line sets into an offscreen texture and reads it back.
    ///
    /// Returns RGBA8 pixels, `width * height * 4` bytes, top row first.
    pub fn capture_frame(
        &mut self,
        background: Vec3,
        line_sets: &[&LineSetRenderData],
    ) -> RenderResult<Vec<u8>> {
        let width = self.width;
        let height = self.height;
        let format = self.color_format();

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("capture texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bytes_per_row = Self::aligned_bytes_per_row(width);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("capture readback buffer"),
            size: u64::from(bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        self.update_camera_uniforms();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("capture encoder"),
            });

        self.render_lines(&mut encoder, &view, background, line_sets);

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and read data
        let buffer_slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::PollType::wait_indefinitely());
        rx.recv()
            .map_err(|e| RenderError::CaptureFailed(e.to_string()))?
            .map_err(|e| RenderError::CaptureFailed(e.to_string()))?;

        let mut pixels = {
            let data = buffer_slice.get_mapped_range();
            unpad_rows(&data, width, height, bytes_per_row)
        };
        buffer.unmap();

        if matches!(
            format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        ) {
            bgra_to_rgba(&mut pixels);
        }

        log::debug!("captured {width}x{height} frame");
        Ok(pixels)
    }
}

/// Copies `height` rows of `width * 4` bytes out of a buffer whose rows are
/// `bytes_per_row` apart.
pub(crate) fn unpad_rows(data: &[u8], width: u32, height: u32, bytes_per_row: u32) -> Vec<u8> {
    let row_bytes = (width * 4) as usize;
    let mut result = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height {
        let start = (row * bytes_per_row) as usize;
        result.extend_from_slice(&data[start..start + row_bytes]);
    }
    result
}

/// Swaps the red and blue channels in place.
pub(crate) fn bgra_to_rgba(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(4) {
        chunk.swap(0, 2);
    }
}
