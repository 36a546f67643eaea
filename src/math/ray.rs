use glam::Vec3;

/// Minimum hit distance; rejects self-intersections at the ray origin
pub const RAY_EPSILON: f32 = 1e-4;

/// Half-line with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the horizontal plane `y = height`, if it is ahead
pub fn intersect_horizontal_plane(ray: &Ray, height: f32) -> Option<f32> {
    const PARALLEL_EPSILON: f32 = 1e-8;

    if ray.direction.y.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (height - ray.origin.y) / ray.direction.y;
    (t > RAY_EPSILON).then_some(t)
}
