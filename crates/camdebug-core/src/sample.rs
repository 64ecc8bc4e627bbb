//! Camera samples parsed from log lines.
//!
//! A log line looks like `<label> ux uy uz <label> vx vy vz ...`. Fields 0 and
//! 4 are labels and are skipped, anything past field 7 is ignored.

use std::fmt;

use glam::Vec3;

use crate::error::ParseError;

/// Minimum number of whitespace-separated fields in a parseable line.
pub const MIN_FIELDS: usize = 8;

/// Field offset of the first component of `u`.
const U_OFFSET: usize = 1;
/// Field offset of the first component of `v`.
const V_OFFSET: usize = 5;

/// One pair of vectors read from the camera log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSample {
    /// Position-like vector.
    pub u: Vec3,
    /// Direction-like vector.
    pub v: Vec3,
}

impl CameraSample {
    /// Creates a sample from its two vectors.
    #[must_use]
    pub fn new(u: Vec3, v: Vec3) -> Self {
        Self { u, v }
    }

    /// The cross product `u × v`.
    #[must_use]
    pub fn cross(&self) -> Vec3 {
        self.u.cross(self.v)
    }

    /// Angle between `u` and `v` in degrees, or `None` if either is zero.
    #[must_use]
    pub fn angle_degrees(&self) -> Option<f32> {
        if self.u.length_squared() == 0.0 || self.v.length_squared() == 0.0 {
            return None;
        }
        Some(self.u.angle_between(self.v).to_degrees())
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }
}

impl fmt::Display for CameraSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "u: {} {} {} v: {} {} {}",
            self.u.x, self.u.y, self.u.z, self.v.x, self.v.y, self.v.z
        )
    }
}

/// Parses a single log line into a [`CameraSample`].
///
/// # Errors
///
/// Returns [`ParseError::TooFewFields`] if the line has fewer than
/// [`MIN_FIELDS`] fields and [`ParseError::InvalidNumber`] if one of the six
/// vector components is not a float.
pub fn parse_line(line: &str) -> Result<CameraSample, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(ParseError::TooFewFields {
            found: fields.len(),
        });
    }

    let u = parse_vec3(&fields, U_OFFSET)?;
    let v = parse_vec3(&fields, V_OFFSET)?;
    Ok(CameraSample { u, v })
}

fn parse_vec3(fields: &[&str], offset: usize) -> Result<Vec3, ParseError> {
    let mut components = [0.0_f32; 3];
    for (i, component) in components.iter_mut().enumerate() {
        let index = offset + i;
        let token = fields[index];
        *component = token.parse().map_err(|_| ParseError::InvalidNumber {
            index,
            token: token.to_string(),
        })?;
    }
    Ok(Vec3::from_array(components))
}
