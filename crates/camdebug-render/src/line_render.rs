//! Line set GPU rendering resources.

use wgpu::util::DeviceExt;

use camdebug_core::Segment;

/// Uniforms for line set rendering.
/// Layout must match WGSL `LineUniforms` exactly (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct LineUniforms {
    /// Multiplier applied to every segment's alpha.
    pub opacity: f32,
    /// Padding to 16-byte alignment
    pub _padding: [f32; 3],
}

impl Default for LineUniforms {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            _padding: [0.0; 3],
        }
    }
}

/// GPU resources for a fixed-capacity set of colored segments.
///
/// The segments can be replaced every frame with [`Self::update_segments`];
/// the buffers are sized once for `capacity` segments.
pub struct LineSetRenderData {
    /// Segment vertex buffer - contains tail and tip positions per segment.
    /// Layout: [tail0, tip0, tail1, tip1, ...] (vec4 each for alignment)
    pub vertex_buffer: wgpu::Buffer,
    /// Segment color buffer (per-segment colors, vec4).
    pub color_buffer: wgpu::Buffer,
    /// Uniform buffer for line set settings.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group for this line set.
    pub bind_group: wgpu::BindGroup,
    capacity: u32,
    num_segments: u32,
}

impl LineSetRenderData {
    /// Creates an empty line set with room for `capacity` segments.
    ///
    /// # Arguments
    /// * `device` - The wgpu device
    /// * `bind_group_layout` - The bind group layout for line sets
    /// * `camera_buffer` - The camera uniform buffer
    /// * `capacity` - Maximum number of segments (at least 1)
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        capacity: u32,
    ) -> Self {
        let capacity = capacity.max(1);

        let vertex_data = vec![0.0_f32; capacity as usize * 8];
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line set vertices"),
            contents: bytemuck::cast_slice(&vertex_data),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let color_data = vec![0.0_f32; capacity as usize * 4];
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line set colors"),
            contents: bytemuck::cast_slice(&color_data),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line set uniforms"),
            contents: bytemuck::cast_slice(&[LineUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Bindings:
        // 0: camera uniforms (uniform)
        // 1: line uniforms (uniform)
        // 2: segment vertices (storage)
        // 3: segment colors (storage)
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line set bind group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: vertex_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: color_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            vertex_buffer,
            color_buffer,
            uniform_buffer,
            bind_group,
            capacity,
            num_segments: 0,
        }
    }

    /// Replaces the segments. Segments past the capacity are dropped.
    pub fn update_segments(&mut self, queue: &wgpu::Queue, segments: &[Segment]) {
        let count = segments.len().min(self.capacity as usize);
        if count < segments.len() {
            log::warn!(
                "line set holds {} segments, dropping {}",
                self.capacity,
                segments.len() - count
            );
        }
        let segments = &segments[..count];

        if !segments.is_empty() {
            let (vertex_data, color_data) = pack_segments(segments);
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertex_data));
            queue.write_buffer(&self.color_buffer, 0, bytemuck::cast_slice(&color_data));
        }
        self.num_segments = count as u32;
    }

    /// Updates the uniform buffer.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &LineUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Number of segments currently drawn.
    #[must_use]
    pub fn num_segments(&self) -> u32 {
        self.num_segments
    }

    /// Maximum number of segments.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Records the draw call into `render_pass`. The line pipeline must be set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.num_segments == 0 {
            return;
        }
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..self.num_segments * 2, 0..1);
    }
}

/// Packs segments into the vertex (vec4 per endpoint) and color (vec4 per
/// segment) layouts the line shader reads.
fn pack_segments(segments: &[Segment]) -> (Vec<f32>, Vec<f32>) {
    let mut vertex_data = Vec::with_capacity(segments.len() * 8);
    let mut color_data = Vec::with_capacity(segments.len() * 4);
    for segment in segments {
        vertex_data.extend_from_slice(&[segment.tail.x, segment.tail.y, segment.tail.z, 1.0]);
        vertex_data.extend_from_slice(&[segment.tip.x, segment.tip.y, segment.tip.z, 1.0]);
        color_data.extend_from_slice(&[segment.color.x, segment.color.y, segment.color.z, 1.0]);
    }
    (vertex_data, color_data)
}
