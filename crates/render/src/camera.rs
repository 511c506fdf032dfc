use cakestand_input::Ray;
use glam::{Mat4, Quat, Vec2, Vec3};

/// Offset from a focused cake to the camera eye: above and behind.
pub const FOCUS_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 5.0);
/// Up vector applied when focusing. Normalized before use.
pub const FOCUS_UP: Vec3 = Vec3::new(0.0, 5.0, 0.0);

/// Orbit camera: an eye looking at a target, with orbit / pan / zoom controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// World units per pixel of drag, per unit of distance to the target.
    pub pan_speed: f32,
    /// Distance multiplier per wheel step.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            rotate_speed: 0.005,
            pan_speed: 0.0015,
            zoom_step: 0.9,
            min_distance: 0.5,
            max_distance: 200.0,
        }
    }
}

impl OrbitCamera {
    /// Put the eye above and behind `point`, look at it, and reset `up`.
    pub fn focus_on(&mut self, point: Vec3) {
        self.position = point + FOCUS_OFFSET;
        self.target = point;
        self.up = FOCUS_UP.normalize();
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Orbit around the target: yaw about `up`, pitch about the camera right axis.
    pub fn rotate(&mut self, delta: Vec2) {
        let mut offset = self.position - self.target;
        if offset.length_squared() < 1e-9 {
            offset = Vec3::Z;
        }

        let yaw = Quat::from_axis_angle(self.up, -delta.x * self.rotate_speed);
        offset = yaw * offset;

        let right = (-offset).cross(self.up).normalize_or_zero();
        if right.length_squared() > 1e-9 {
            let pitch = Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
            let candidate = pitch * offset;
            // Stop short of the poles so look_at stays well defined
            if candidate.normalize_or_zero().dot(self.up).abs() < 0.995 {
                offset = candidate;
            }
        }

        self.position = self.target + offset;
    }

    /// Dolly toward the target; positive steps zoom in.
    pub fn zoom(&mut self, steps: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if !distance.is_finite() || distance < 1e-4 {
            return;
        }
        let new_distance =
            (distance * self.zoom_step.powf(steps)).clamp(self.min_distance, self.max_distance);
        self.position = self.target + offset / distance * new_distance;
    }

    /// Move eye and target together in the view plane. Dragging right moves
    /// the scene right.
    pub fn pan(&mut self, delta: Vec2) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let screen_up = right.cross(forward);
        let scale = self.distance().max(1e-3) * self.pan_speed;
        let shift = (-right * delta.x + screen_up * delta.y) * scale;
        self.position += shift;
        self.target += shift;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a window pixel (origin top-left).
    pub fn screen_ray(&self, pixel: Vec2, viewport: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * pixel.x / viewport.x.max(1.0) - 1.0,
            1.0 - 2.0 * pixel.y / viewport.y.max(1.0),
        );
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }

    /// Window pixel of a world point, or `None` when it is off screen or
    /// behind the eye.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}
