use glam::Vec3;

use super::orbit::OrbitSample;
use crate::camera::OrbitCamera;

/// Per-frame snapshot handed to every layer
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    pub number: u64,
    /// Real seconds since the previous frame
    pub delta: f32,
    pub camera: OrbitCamera,
    pub orbit: OrbitSample,
    /// Moon centre in world space
    pub moon_position: Vec3,
}

impl FrameState {
    pub fn new(number: u64, delta: f32, camera: OrbitCamera, orbit: OrbitSample, plane_y: f32) -> Self {
        Self {
            number,
            delta,
            camera,
            orbit,
            moon_position: orbit.position.to_vec3(plane_y),
        }
    }
}
