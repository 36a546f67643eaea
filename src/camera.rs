use glam::Vec3;

use crate::core::{Button, Controller, DisplayContext};
use crate::math::Ray;

/// Radians per second while an orbit key is held
pub const CAMERA_ROTATION_SPEED: f32 = 1.2;
/// Radians per pixel of mouse drag
pub const CAMERA_DRAG_SPEED: f32 = 0.005;
/// Fraction of distance covered per second while a zoom key is held
pub const CAMERA_ZOOM_SPEED: f32 = 1.0;
/// Target travel per pixel of right drag, as a fraction of distance
pub const CAMERA_PAN_SPEED: f32 = 0.001;
/// Distance scale applied per wheel line
pub const CAMERA_WHEEL_STEP: f32 = 0.9;

const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 500.0;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Projected point in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// View-space distance along the camera forward axis
    pub depth: f32,
}

/// Perspective camera orbiting a target point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Camera at `position` looking at `target`
    pub fn looking_at(position: Vec3, target: Vec3, fov_degrees: f32, near: f32, far: f32) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = if offset.length() > 0.0 {
            (offset.y / offset.length()).asin()
        } else {
            0.0
        };

        Self {
            target,
            distance,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov_y: fov_degrees.to_radians(),
            near,
            far,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Apply held keys, mouse drag and wheel from one frame
    pub fn update(&mut self, delta: f32, controller: &dyn Controller) {
        let axis = |positive: Button, negative: Button| {
            controller.is_down(positive) as i32 as f32 - controller.is_down(negative) as i32 as f32
        };

        self.yaw += axis(Button::KeyD, Button::KeyA) * CAMERA_ROTATION_SPEED * delta;
        self.pitch += axis(Button::KeyW, Button::KeyS) * CAMERA_ROTATION_SPEED * delta;

        if controller.is_down(Button::MouseLeft) {
            let (dx, dy) = controller.mouse_delta();
            self.yaw -= dx * CAMERA_DRAG_SPEED;
            self.pitch += dy * CAMERA_DRAG_SPEED;
        }

        if controller.is_down(Button::MouseRight) {
            let (dx, dy) = controller.mouse_delta();
            let step = self.distance * CAMERA_PAN_SPEED;
            self.target += (self.up() * dy - self.right() * dx) * step;
        }

        let zoom = axis(Button::KeyE, Button::KeyQ);
        self.distance *= (1.0 - zoom * CAMERA_ZOOM_SPEED * delta).max(0.1);
        self.distance *= CAMERA_WHEEL_STEP.powf(controller.scroll_delta());

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn half_extents(&self, aspect: f32) -> (f32, f32) {
        let half_h = (self.fov_y * 0.5).tan();
        (half_h * aspect, half_h)
    }

    /// Primary ray through the centre of pixel (`px`, `py`)
    pub fn ray_for_pixel(&self, px: u32, py: u32, context: &DisplayContext) -> Ray {
        let (half_w, half_h) = self.half_extents(context.aspect());
        let sx = (2.0 * (px as f32 + 0.5) / context.width as f32 - 1.0) * half_w;
        let sy = (1.0 - 2.0 * (py as f32 + 0.5) / context.height as f32) * half_h;

        let forward = self.forward();
        let right = self.right();
        let up = right.cross(forward);
        Ray::new(self.position(), forward + right * sx + up * sy)
    }

    /// Project a world point to pixel coordinates; None outside the view volume
    pub fn project(&self, point: Vec3, context: &DisplayContext) -> Option<ScreenPoint> {
        let forward = self.forward();
        let right = self.right();
        let up = right.cross(forward);

        let rel = point - self.position();
        let depth = rel.dot(forward);
        if depth < self.near || depth > self.far {
            return None;
        }

        let (half_w, half_h) = self.half_extents(context.aspect());
        let sx = rel.dot(right) / (depth * half_w);
        let sy = rel.dot(up) / (depth * half_h);
        if sx.abs() > 1.0 || sy.abs() > 1.0 {
            return None;
        }

        Some(ScreenPoint {
            x: (sx + 1.0) * 0.5 * context.width as f32,
            y: (1.0 - sy) * 0.5 * context.height as f32,
            depth,
        })
    }

    /// Pixels per world unit at `depth`
    pub fn pixels_per_unit(&self, depth: f32, context: &DisplayContext) -> f32 {
        let (_, half_h) = self.half_extents(context.aspect());
        context.height as f32 * 0.5 / (depth * half_h)
    }
}
