//! Error types for camdebug.

use thiserror::Error;

/// Why a log line could not be turned into a [`CameraSample`](crate::CameraSample).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line has fewer whitespace-separated fields than a sample needs.
    #[error("expected at least {expected} fields, found {found}", expected = crate::sample::MIN_FIELDS)]
    TooFewFields { found: usize },

    /// A vector component is not a valid float.
    #[error("field {index} is not a number: '{token}'")]
    InvalidNumber { index: usize, token: String },
}

/// The main error type for camdebug operations.
#[derive(Error, Debug)]
pub enum CamDebugError {
    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A log line could not be parsed.
    #[error("parse error: {0}")]
    ParseError(#[from] ParseError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// An option holds a value the viewer cannot use.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The graphics device could not be set up.
    #[error("render error: {0}")]
    RenderError(String),

    /// A rendered frame could not be read back or written as an image.
    #[error("capture error: {0}")]
    CaptureError(String),
}

/// A specialized Result type for camdebug operations.
pub type Result<T> = std::result::Result<T, CamDebugError>;
