//! Rendering backend for camdebug.
//!
//! This crate provides the wgpu-based rendering engine, including:
//! - Surface and headless device setup
//! - The line set pipeline (WGSL) used for axes and sample vectors
//! - The orbit camera
//! - Frame capture and image saving

pub mod camera;
pub mod engine;
pub mod error;
pub mod line_render;
pub mod screenshot;

pub use camera::{Camera, ProjectionMode};
pub use engine::{check_target_size, CameraUniforms, RenderEngine, DEPTH_FORMAT};
pub use error::{RenderError, RenderResult};
pub use line_render::{LineSetRenderData, LineUniforms};
pub use screenshot::{save_image, ScreenshotError};
