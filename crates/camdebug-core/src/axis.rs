//! World axis directions.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis direction used for the viewer's up vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisDirection {
    /// Positive X axis.
    PosX,
    /// Negative X axis.
    NegX,
    /// Positive Y axis (default up).
    #[default]
    PosY,
    /// Negative Y axis.
    NegY,
    /// Positive Z axis.
    PosZ,
    /// Negative Z axis.
    NegZ,
}

impl AxisDirection {
    /// All directions, in index order.
    pub const ALL: [AxisDirection; 6] = [
        AxisDirection::PosX,
        AxisDirection::NegX,
        AxisDirection::PosY,
        AxisDirection::NegY,
        AxisDirection::PosZ,
        AxisDirection::NegZ,
    ];

    /// Returns the unit vector for this direction.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        match self {
            AxisDirection::PosX => Vec3::X,
            AxisDirection::NegX => Vec3::NEG_X,
            AxisDirection::PosY => Vec3::Y,
            AxisDirection::NegY => Vec3::NEG_Y,
            AxisDirection::PosZ => Vec3::Z,
            AxisDirection::NegZ => Vec3::NEG_Z,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AxisDirection::PosX => "+X",
            AxisDirection::NegX => "-X",
            AxisDirection::PosY => "+Y",
            AxisDirection::NegY => "-Y",
            AxisDirection::PosZ => "+Z",
            AxisDirection::NegZ => "-Z",
        }
    }

    /// Returns the side of the scene the viewer starts on when this is up.
    /// Follows right-hand coordinate system conventions:
    /// - +Y up → camera on +Z, looking down -Z
    /// - +Z up → camera on -Y, looking down +Y
    #[must_use]
    pub fn default_eye_direction(self) -> Vec3 {
        match self {
            AxisDirection::PosY => Vec3::Z,
            AxisDirection::NegY => Vec3::NEG_Z,
            AxisDirection::PosZ => Vec3::NEG_Y,
            AxisDirection::NegZ => Vec3::Y,
            AxisDirection::PosX => Vec3::Z,
            AxisDirection::NegX => Vec3::NEG_Z,
        }
    }

    /// Parses the display name (`+x`, `-Z`, `y`, ...). A missing sign means positive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let (negative, axis) = match name.as_bytes() {
            [b'-', axis] => (true, *axis),
            [b'+', axis] | [axis] => (false, *axis),
            _ => return None,
        };
        match (axis, negative) {
            (b'x', false) => Some(AxisDirection::PosX),
            (b'x', true) => Some(AxisDirection::NegX),
            (b'y', false) => Some(AxisDirection::PosY),
            (b'y', true) => Some(AxisDirection::NegY),
            (b'z', false) => Some(AxisDirection::PosZ),
            (b'z', true) => Some(AxisDirection::NegZ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_direction_to_vec3() {
        assert_eq!(AxisDirection::PosX.to_vec3(), Vec3::X);
        assert_eq!(AxisDirection::NegX.to_vec3(), Vec3::NEG_X);
        assert_eq!(AxisDirection::PosY.to_vec3(), Vec3::Y);
        assert_eq!(AxisDirection::NegY.to_vec3(), Vec3::NEG_Y);
        assert_eq!(AxisDirection::PosZ.to_vec3(), Vec3::Z);
        assert_eq!(AxisDirection::NegZ.to_vec3(), Vec3::NEG_Z);
    }

    #[test]
    fn test_eye_direction_is_perpendicular_to_up() {
        for dir in AxisDirection::ALL {
            assert_eq!(dir.default_eye_direction().dot(dir.to_vec3()), 0.0);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(AxisDirection::from_name("+Z"), Some(AxisDirection::PosZ));
        assert_eq!(AxisDirection::from_name("z"), Some(AxisDirection::PosZ));
        assert_eq!(AxisDirection::from_name("-y"), Some(AxisDirection::NegY));
        assert_eq!(AxisDirection::from_name("w"), None);
        assert_eq!(AxisDirection::from_name("+-x"), None);
        for dir in AxisDirection::ALL {
            assert_eq!(AxisDirection::from_name(dir.name()), Some(dir));
        }
    }
}
