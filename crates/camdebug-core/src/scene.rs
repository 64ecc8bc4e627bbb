//! Line geometry for the reference axes and the current sample.

use glam::Vec3;

use crate::options::{Options, VectorLayout};
use crate::sample::CameraSample;

/// Color of the x reference axis.
pub const X_AXIS_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0);
/// Color of the y reference axis.
pub const Y_AXIS_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Color of the z reference axis.
pub const Z_AXIS_COLOR: Vec3 = Vec3::new(0.0, 0.5, 0.0);
/// Color of `u`.
pub const U_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.0);
/// Color of `v`.
pub const V_COLOR: Vec3 = Vec3::new(0.6, 0.2, 0.8);
/// Color of `u × v`.
pub const CROSS_COLOR: Vec3 = Vec3::new(0.0, 0.6, 0.6);

/// A colored line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub tail: Vec3,
    pub tip: Vec3,
    pub color: Vec3,
}

impl Segment {
    #[must_use]
    pub fn new(tail: Vec3, tip: Vec3, color: Vec3) -> Self {
        Self { tail, tip, color }
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.tail.distance(self.tip)
    }
}

/// The three reference axes from the origin, x blue, y red, z green.
#[must_use]
pub fn reference_axes(length: f32) -> [Segment; 3] {
    [
        Segment::new(Vec3::ZERO, Vec3::X * length, X_AXIS_COLOR),
        Segment::new(Vec3::ZERO, Vec3::Y * length, Y_AXIS_COLOR),
        Segment::new(Vec3::ZERO, Vec3::Z * length, Z_AXIS_COLOR),
    ]
}

/// Builds the segments that show `sample` under the given options.
///
/// `u` always starts at the origin. `v` and `u × v` start at `u` with
/// [`VectorLayout::PositionDirection`] and at the origin otherwise. `u × v`
/// is drawn with the length of the scaled `v`. Samples with non-finite
/// components produce no geometry, and a vector whose tip or length
/// overflows `f32` is left out.
#[must_use]
pub fn sample_segments(sample: &CameraSample, options: &Options) -> Vec<Segment> {
    let mut segments = Vec::new();
    if !sample.is_finite() {
        return segments;
    }

    let head_fraction = if options.arrow_heads {
        options.arrow_head_fraction
    } else {
        0.0
    };
    let direction = sample.v * options.direction_scale;
    let origin = match options.vector_layout {
        VectorLayout::PositionDirection => sample.u,
        VectorLayout::FromOrigin => Vec3::ZERO,
    };

    if options.show_u {
        push_vector(&mut segments, Vec3::ZERO, sample.u, U_COLOR, head_fraction);
    }
    if options.show_v {
        push_vector(&mut segments, origin, origin + direction, V_COLOR, head_fraction);
    }
    if options.show_cross {
        let cross = sample.cross().normalize_or_zero() * direction.length();
        push_vector(&mut segments, origin, origin + cross, CROSS_COLOR, head_fraction);
    }
    segments
}

/// Pushes a shaft from `tail` to `tip`, plus a two-stroke arrowhead when
/// `head_fraction` is positive and the shaft has length.
fn push_vector(
    segments: &mut Vec<Segment>,
    tail: Vec3,
    tip: Vec3,
    color: Vec3,
    head_fraction: f32,
) {
    let length = tail.distance(tip);
    if !tail.is_finite() || !tip.is_finite() || !length.is_finite() {
        return;
    }
    segments.push(Segment::new(tail, tip, color));

    if head_fraction <= 0.0 || length <= f32::EPSILON {
        return;
    }
    let dir = (tip - tail) / length;
    let head_length = length * head_fraction;
    let side = dir.any_orthonormal_vector() * (head_length * 0.5);
    let base = tip - dir * head_length;
    segments.push(Segment::new(tip, base + side, color));
    segments.push(Segment::new(tip, base - side, color));
}

/// Axis-aligned bounds of all finite segment endpoints, or `None` if there
/// are none.
#[must_use]
pub fn bounds(segments: &[Segment]) -> Option<(Vec3, Vec3)> {
    segments
        .iter()
        .flat_map(|s| [s.tail, s.tip])
        .filter(|p| p.is_finite())
        .fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((min.min(p), max.max(p))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_heads() -> Options {
        Options {
            arrow_heads: false,
            ..Options::default()
        }
    }

    #[test]
    fn test_reference_axes() {
        let axes = reference_axes(2.0);
        assert_eq!(axes[0].tip, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(axes[1].tip, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(axes[2].tip, Vec3::new(0.0, 0.0, 2.0));
        assert!(axes.iter().all(|s| s.tail == Vec3::ZERO));
        assert_eq!(axes[0].color, X_AXIS_COLOR);
    }

    #[test]
    fn test_position_direction_layout() {
        let sample = CameraSample::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let segments = sample_segments(&sample, &no_heads());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new(Vec3::ZERO, sample.u, U_COLOR));
        assert_eq!(
            segments[1],
            Segment::new(sample.u, Vec3::new(1.0, 2.0, 2.0), V_COLOR)
        );
    }

    #[test]
    fn test_from_origin_layout_and_scale() {
        let options = Options {
            vector_layout: VectorLayout::FromOrigin,
            direction_scale: 2.0,
            ..no_heads()
        };
        let sample = CameraSample::new(Vec3::X, Vec3::Y);
        let segments = sample_segments(&sample, &options);
        assert_eq!(segments[1].tail, Vec3::ZERO);
        assert_eq!(segments[1].tip, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_cross_has_scaled_direction_length() {
        let options = Options {
            show_u: false,
            show_v: false,
            show_cross: true,
            vector_layout: VectorLayout::FromOrigin,
            ..no_heads()
        };
        let sample = CameraSample::new(Vec3::X * 5.0, Vec3::Y * 3.0);
        let segments = sample_segments(&sample, &options);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].tip - Vec3::Z * 3.0).length() < 1e-5);
        assert_eq!(segments[0].color, CROSS_COLOR);
    }

    #[test]
    fn test_arrow_heads() {
        let options = Options {
            show_v: false,
            arrow_head_fraction: 0.2,
            ..Options::default()
        };
        let sample = CameraSample::new(Vec3::X * 10.0, Vec3::Y);
        let segments = sample_segments(&sample, &options);
        assert_eq!(segments.len(), 3);
        for head in &segments[1..] {
            assert_eq!(head.tail, sample.u);
            assert!(head.tip.x < 10.0);
            // Strokes sit 2 units behind the tip and 1 unit to the side.
            assert!((head.length() - 5.0_f32.sqrt()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_vector_has_no_arrow_head() {
        let sample = CameraSample::new(Vec3::ZERO, Vec3::Y);
        let options = Options {
            show_v: false,
            ..Options::default()
        };
        assert_eq!(sample_segments(&sample, &options).len(), 1);
    }

    #[test]
    fn test_non_finite_sample_draws_nothing() {
        let sample = CameraSample::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::Y);
        assert!(sample_segments(&sample, &Options::default()).is_empty());
    }

    #[test]
    fn test_overflowing_vectors_are_left_out() {
        let options = Options {
            show_cross: true,
            ..Options::default()
        };
        let huge = CameraSample::new(Vec3::splat(3e38), Vec3::splat(3e38));
        assert!(huge.is_finite());
        let segments = sample_segments(&huge, &options);
        assert!(segments.iter().all(|s| s.tail.is_finite() && s.tip.is_finite()));
        assert!(bounds(&segments).is_none());

        // u alone is drawable; v from its tip overflows
        let sample = CameraSample::new(Vec3::X * 3e38, Vec3::X * 3e38);
        let segments = sample_segments(&sample, &options);
        assert!(segments.iter().any(|s| s.color == U_COLOR));
        assert!(segments.iter().all(|s| s.color != V_COLOR));
        let (min, max) = bounds(&segments).unwrap();
        assert!(min.is_finite() && max.is_finite());
    }

    #[test]
    fn test_bounds_skip_non_finite_points() {
        let segments = [
            Segment::new(Vec3::ZERO, Vec3::ONE, U_COLOR),
            Segment::new(Vec3::ONE, Vec3::splat(f32::INFINITY), V_COLOR),
        ];
        assert_eq!(bounds(&segments), Some((Vec3::ZERO, Vec3::ONE)));
    }

    #[test]
    fn test_bounds() {
        assert!(bounds(&[]).is_none());
        let segments = [
            Segment::new(Vec3::ZERO, Vec3::new(1.0, -2.0, 0.5), U_COLOR),
            Segment::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::Z, V_COLOR),
        ];
        let (min, max) = bounds(&segments).unwrap();
        assert_eq!(min, Vec3::new(-3.0, -2.0, 0.0));
        assert_eq!(max, Vec3::new(1.0, 0.0, 1.0));
    }
}
