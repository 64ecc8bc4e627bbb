//! GPU line sets for the axes and the current sample.
//!
//! Shared by the window and the headless renderer.

use camdebug_core::{bounds, reference_axes, sample_segments, CameraSample, Options, Segment};
use camdebug_render::{Camera, LineSetRenderData, LineUniforms, RenderEngine};
use glam::Vec3;

/// Opacity of sample vectors while the last poll has failed.
pub(crate) const STALE_OPACITY: f32 = 0.35;

const AXES_CAPACITY: u32 = 3;
// Shaft plus two arrowhead strokes for each of u, v and u × v.
const VECTORS_CAPACITY: u32 = 9;

pub(crate) struct SceneBuffers {
    axes: LineSetRenderData,
    vectors: LineSetRenderData,
    bounds: Option<(Vec3, Vec3)>,
}

impl SceneBuffers {
    pub(crate) fn new(engine: &RenderEngine) -> Self {
        Self {
            axes: engine.create_line_set(AXES_CAPACITY),
            vectors: engine.create_line_set(VECTORS_CAPACITY),
            bounds: None,
        }
    }

    /// Rebuilds the segments from `options` and the latest sample.
    pub(crate) fn update_geometry(
        &mut self,
        queue: &wgpu::Queue,
        options: &Options,
        sample: Option<&CameraSample>,
    ) {
        let axes: Vec<Segment> = if options.show_axes {
            reference_axes(options.axis_length).to_vec()
        } else {
            Vec::new()
        };
        let vectors = sample
            .map(|sample| sample_segments(sample, options))
            .unwrap_or_default();

        self.axes.update_segments(queue, &axes);
        self.vectors.update_segments(queue, &vectors);

        let all: Vec<Segment> = axes.iter().chain(&vectors).copied().collect();
        self.bounds = bounds(&all);
        log::debug!(
            "scene rebuilt: {} axis segments, {} vector segments",
            axes.len(),
            vectors.len()
        );
    }

    /// Dims the sample vectors when `stale` is set.
    pub(crate) fn set_stale(&self, queue: &wgpu::Queue, stale: bool) {
        let opacity = if stale { STALE_OPACITY } else { 1.0 };
        self.vectors.update_uniforms(
            queue,
            &LineUniforms {
                opacity,
                ..LineUniforms::default()
            },
        );
    }

    /// Points `camera` at everything drawn, always including the origin.
    pub(crate) fn fit_camera(&self, camera: &mut Camera) {
        let (min, max) = self
            .bounds
            .map_or((Vec3::splat(-1.0), Vec3::splat(1.0)), |(min, max)| {
                (min.min(Vec3::ZERO), max.max(Vec3::ZERO))
            });
        camera.look_at_box(min, max);
    }

    pub(crate) fn line_sets(&self) -> [&LineSetRenderData; 2] {
        [&self.axes, &self.vectors]
    }
}
