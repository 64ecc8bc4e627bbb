//! Core types for camdebug.
//!
//! This crate has no GPU dependencies. It provides:
//! - [`CameraSample`] and [`parse_line`] for the camera log format
//! - [`SampleSource`], which polls the tail of a growing log file
//! - Scene geometry ([`Segment`], [`reference_axes`], [`sample_segments`])
//! - [`Options`] and the error types

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod axis;
pub mod error;
pub mod options;
pub mod sample;
pub mod scene;
pub mod source;

pub use axis::AxisDirection;
pub use error::{CamDebugError, ParseError, Result};
pub use options::{Options, VectorLayout};
pub use sample::{parse_line, CameraSample, MIN_FIELDS};
pub use scene::{bounds, reference_axes, sample_segments, Segment};
pub use source::{read_last_line, read_last_sample, PollOutcome, PollTimer, SampleSource};

// Re-export glam types for convenience
pub use glam::Vec3;
