use glam::Vec3;

use crate::math::{Ray, RAY_EPSILON};

/// Sphere primitive for the CPU ray caster
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Same sphere moved to `center`
    pub fn at(self, center: Vec3) -> Self {
        Self { center, ..self }
    }

    /// Nearest hit distance along `ray`, using the half-b form of the quadratic
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let half_b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t = (-half_b - sqrt_d) / a;

        if t > RAY_EPSILON {
            Some(t)
        } else {
            let t = (-half_b + sqrt_d) / a;
            (t > RAY_EPSILON).then_some(t)
        }
    }

    /// Outward unit normal at a point on the surface
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
