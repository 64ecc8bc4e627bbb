//! Camera and view management.

use glam::{Mat4, Quat, Vec3};

use camdebug_core::AxisDirection;

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// Smallest polar angle the orbit keeps between the view direction and up.
const POLE_MARGIN: f32 = 0.01;

/// An orbiting camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Up direction.
    pub up_direction: AxisDirection,
    /// Orthographic scale (used when `projection_mode` is Orthographic).
    pub ortho_scale: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
            projection_mode: ProjectionMode::Perspective,
            up_direction: AxisDirection::PosY,
            ortho_scale: 1.0,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * self.aspect_ratio;
                // Symmetric depth range around the target so nothing between
                // the camera and the target is clipped.
                let dist = (self.position - self.target).length();
                let ortho_depth = (dist + self.far).max(self.ortho_scale * 100.0);
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    -ortho_depth,
                    ortho_depth,
                )
            }
        }
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Orbits the camera around the target, turntable style about `up`.
    ///
    /// `delta_x` spins about the up axis; `delta_y` tilts toward it. The tilt
    /// stops just short of the poles so the view never flips.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.position - self.target;
        if offset.length_squared() <= f32::EPSILON {
            return;
        }

        let mut offset = Quat::from_axis_angle(self.up, -delta_x) * offset;

        let phi = offset.angle_between(self.up);
        let new_phi = (phi - delta_y).clamp(POLE_MARGIN, std::f32::consts::PI - POLE_MARGIN);
        let tilt_axis = offset.cross(self.up).normalize_or_zero();
        if tilt_axis != Vec3::ZERO {
            offset = Quat::from_axis_angle(tilt_axis, phi - new_phi) * offset;
        }

        self.position = self.target + offset;
    }

    /// Pans the camera.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = self.right();
        let up = self.right().cross(self.forward());
        let offset = right * delta_x + up * delta_y;
        self.position += offset;
        self.target += offset;
    }

    /// Zooms the camera (moves toward/away from target for perspective,
    /// adjusts `ortho_scale` for orthographic).
    pub fn zoom(&mut self, delta: f32) {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                let direction = self.forward();
                let distance = (self.position - self.target).length();
                let new_distance = (distance - delta * distance * 0.1).max(self.near * 2.0);
                self.position = self.target - direction * new_distance;
            }
            ProjectionMode::Orthographic => {
                // delta > 0 means zoom in (scroll up), so decrease scale
                let zoom_factor = 1.0 - delta * 0.1;
                self.ortho_scale = (self.ortho_scale * zoom_factor).clamp(0.01, 1000.0);
            }
        }
    }

    /// Resets the camera to look at the given bounding box from an elevated corner.
    ///
    /// A box too large to frame in `f32` leaves the camera unchanged.
    pub fn look_at_box(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let size = (max - min).length().max(1e-3);
        let extents = max - min;
        if !center.is_finite() || !(size * 100.0).is_finite() {
            log::warn!("cannot frame box {min} to {max}; keeping the current view");
            return;
        }

        let eye = self.up_direction.default_eye_direction();
        let side = self.up.cross(eye);
        let view_dir = (eye + self.up * 0.6 + side * 0.8).normalize();

        self.target = center;
        self.position = center + view_dir * (size * 1.5);
        self.near = size * 0.001;
        self.far = size * 100.0;

        // Fit the larger of height or width/aspect_ratio
        let half_height = extents.max_element().max(extents.x / self.aspect_ratio) * 0.6;
        self.ortho_scale = half_height.max(0.1);
    }

    /// Sets the projection mode.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Sets the up direction.
    pub fn set_up_direction(&mut self, direction: AxisDirection) {
        self.up_direction = direction;
        self.up = direction.to_vec3();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
