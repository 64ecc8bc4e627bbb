//! Configuration options for the viewer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::axis::AxisDirection;
use crate::error::{CamDebugError, Result};

/// How the two sample vectors are laid out in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VectorLayout {
    /// `u` is a point reached from the origin; `v` is drawn starting at `u`.
    #[default]
    PositionDirection,
    /// Both vectors are drawn as rays from the origin.
    FromOrigin,
}

impl VectorLayout {
    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            VectorLayout::PositionDirection => "position + direction",
            VectorLayout::FromOrigin => "from origin",
        }
    }
}

/// Options for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Camera log to poll.
    pub data_path: PathBuf,

    /// Milliseconds between polls of the log.
    pub poll_interval_ms: u64,

    /// How `u` and `v` are drawn.
    pub vector_layout: VectorLayout,

    /// Length of the reference axes.
    pub axis_length: f32,

    /// Scale applied to `v` when drawn.
    pub direction_scale: f32,

    /// Whether the reference axes are drawn.
    pub show_axes: bool,

    /// Whether `u` is drawn.
    pub show_u: bool,

    /// Whether `v` is drawn.
    pub show_v: bool,

    /// Whether `u × v` is drawn.
    pub show_cross: bool,

    /// Whether vectors get arrowheads.
    pub arrow_heads: bool,

    /// Arrowhead length as a fraction of the vector length.
    pub arrow_head_fraction: f32,

    /// World axis pointing up on screen.
    pub up_direction: AxisDirection,

    /// Background color.
    pub background_color: Vec3,

    /// Initial window width in logical pixels.
    pub window_width: u32,

    /// Initial window height in logical pixels.
    pub window_height: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("camera_out.txt"),
            poll_interval_ms: 100,
            vector_layout: VectorLayout::PositionDirection,
            axis_length: 1.0,
            direction_scale: 1.0,
            show_axes: true,
            show_u: true,
            show_v: true,
            show_cross: false,
            arrow_heads: true,
            arrow_head_fraction: 0.15,
            up_direction: AxisDirection::PosY,
            background_color: Vec3::new(1.0, 1.0, 1.0),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Options {
    /// Loads options from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds values rejected by [`Self::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let options: Options = serde_json::from_str(&text)?;
        options.validate()?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Saves options to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Checks that numeric options are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CamDebugError::InvalidOption`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(CamDebugError::InvalidOption(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !(self.axis_length.is_finite() && self.axis_length > 0.0) {
            return Err(CamDebugError::InvalidOption(format!(
                "axis_length must be a positive number, got {}",
                self.axis_length
            )));
        }
        if !self.direction_scale.is_finite() {
            return Err(CamDebugError::InvalidOption(format!(
                "direction_scale must be finite, got {}",
                self.direction_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.arrow_head_fraction) {
            return Err(CamDebugError::InvalidOption(format!(
                "arrow_head_fraction must be within [0, 1], got {}",
                self.arrow_head_fraction
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(CamDebugError::InvalidOption(
                "window size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The poll interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = Options::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.data_path, PathBuf::from("camera_out.txt"));
        assert_eq!(options.poll_interval(), Duration::from_millis(100));
        assert_eq!(options.vector_layout, VectorLayout::PositionDirection);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: Options =
            serde_json::from_str(r#"{ "poll_interval_ms": 250, "vector_layout": "FromOrigin" }"#)
                .unwrap();
        assert_eq!(options.poll_interval_ms, 250);
        assert_eq!(options.vector_layout, VectorLayout::FromOrigin);
        assert_eq!(options.axis_length, 1.0);
        assert!(options.show_axes);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camdebug.json");
        let options = Options {
            data_path: PathBuf::from("logs/cam.txt"),
            up_direction: AxisDirection::PosZ,
            show_cross: true,
            ..Options::default()
        };
        options.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), options);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_interval = Options {
            poll_interval_ms: 0,
            ..Options::default()
        };
        assert!(matches!(
            zero_interval.validate(),
            Err(CamDebugError::InvalidOption(_))
        ));

        let negative_axes = Options {
            axis_length: -1.0,
            ..Options::default()
        };
        assert!(negative_axes.validate().is_err());

        let huge_head = Options {
            arrow_head_fraction: 2.0,
            ..Options::default()
        };
        assert!(huge_head.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(CamDebugError::JsonError(_))
        ));
    }
}
