use glam::Vec3;

use crate::math::{intersect_horizontal_plane, Color, Ray};

/// Flat annulus lying in a horizontal plane, visible from both sides
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ring {
    pub center: Vec3,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Color,
}

impl Ring {
    pub fn new(center: Vec3, inner_radius: f32, outer_radius: f32, color: Color) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            color,
        }
    }

    /// Concentric rings around `center`; ring `i` has outer radius
    /// `base_radius + i * spacing` and inner radius `outer * inner_factor`
    pub fn concentric(
        center: Vec3,
        count: usize,
        base_radius: f32,
        spacing: f32,
        inner_factor: f32,
        color: Color,
    ) -> Vec<Ring> {
        (0..count)
            .map(|i| {
                let outer = base_radius + i as f32 * spacing;
                Ring::new(center, outer * inner_factor, outer, color)
            })
            .collect()
    }

    /// Hit distance if `ray` crosses the plane inside the annulus
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let t = intersect_horizontal_plane(ray, self.center.y)?;
        let offset = ray.at(t) - self.center;
        let dist_sq = offset.x * offset.x + offset.z * offset.z;

        let inner_sq = self.inner_radius * self.inner_radius;
        let outer_sq = self.outer_radius * self.outer_radius;
        (dist_sq >= inner_sq && dist_sq <= outer_sq).then_some(t)
    }
}
