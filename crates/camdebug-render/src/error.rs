//! Rendering error types.

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface supports no texture formats for this adapter.
    #[error("surface is not supported by the graphics adapter")]
    SurfaceUnsupported,

    /// The requested render target is larger than the device allows.
    #[error("{width}x{height} exceeds the maximum texture size of {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    /// Reading a frame back from the GPU failed.
    #[error("frame capture failed: {0}")]
    CaptureFailed(String),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
