//! Ray-cast Earth, Moon and rings.

use std::ops::Range;

use glam::Vec3;

use super::display_context::DisplayContext;
use super::frame::FrameState;
use super::layer::{LayerLogic, LayerOutput};
use super::ring::Ring;
use super::sphere::Sphere;
use crate::camera::OrbitCamera;
use crate::math::{Color, Ray, Rgba};

/// Single white directional light, Phong specular, no ambient term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface towards the light
    pub direction: Vec3,
    pub intensity: f32,
    pub specular: Color,
    pub shininess: f32,
}

impl DirectionalLight {
    /// Light shining from `position` towards the origin
    pub fn from_position(position: Vec3, intensity: f32) -> Self {
        Self {
            direction: position.normalize(),
            intensity,
            specular: Color::from_hex(0x111111),
            shininess: 30.0,
        }
    }

    /// Diffuse plus specular response for a surface of colour `albedo`
    pub fn shade(&self, albedo: Color, normal: Vec3, view_dir: Vec3) -> Color {
        let n_dot_l = normal.dot(self.direction).max(0.0);
        let diffuse = albedo.to_vec3() * n_dot_l;

        let specular = if n_dot_l > 0.0 {
            let reflected = (2.0 * n_dot_l * normal - self.direction).normalize();
            let highlight = reflected.dot(view_dir).max(0.0).powf(self.shininess);
            self.specular.to_vec3() * highlight
        } else {
            Vec3::ZERO
        };

        Color::from_vec3((diffuse + specular) * self.intensity)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::from_position(Vec3::new(5.0, 3.0, 5.0), 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Surface {
    Earth,
    Moon,
    Ring(usize),
}

/// Lit spheres plus unlit rings; the Moon is moved to the frame's orbit position
#[derive(Debug, Clone)]
pub struct BodiesScene {
    pub earth: Sphere,
    pub earth_color: Color,
    pub moon: Sphere,
    pub moon_color: Color,
    pub rings: Vec<Ring>,
    pub light: DirectionalLight,
}

impl BodiesScene {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self {
            earth: Sphere::new(Vec3::ZERO, 1.0),
            earth_color: Color::from_hex(0x0000ff),
            moon: Sphere::new(Vec3::ZERO, 0.27),
            moon_color: Color::from_hex(0x888888),
            rings,
            light: DirectionalLight::default(),
        }
    }

    /// Nearest hit with distance in `t_range` among all surfaces
    fn nearest_hit(&self, ray: &Ray, moon: &Sphere, t_range: Range<f32>) -> Option<(f32, Surface)> {
        let spheres = [(self.earth.intersect(ray), Surface::Earth), (moon.intersect(ray), Surface::Moon)];
        let rings = self
            .rings
            .iter()
            .enumerate()
            .map(|(i, ring)| (ring.intersect(ray), Surface::Ring(i)));

        spheres
            .into_iter()
            .chain(rings)
            .filter_map(|(t, surface)| t.filter(|t| t_range.contains(t)).map(|t| (t, surface)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    /// Colour seen along `ray`, None when it escapes into the background
    pub fn trace(&self, ray: &Ray, moon_position: Vec3) -> Option<Color> {
        self.trace_within(ray, moon_position, 0.0..f32::INFINITY)
    }

    /// Like [`trace`](Self::trace), ignoring hits outside `t_range` along the ray
    pub fn trace_within(&self, ray: &Ray, moon_position: Vec3, t_range: Range<f32>) -> Option<Color> {
        let moon = self.moon.at(moon_position);
        let (t, surface) = self.nearest_hit(ray, &moon, t_range)?;
        let point = ray.at(t);
        let view_dir = -ray.direction;

        Some(match surface {
            Surface::Earth => self.light.shade(self.earth_color, self.earth.normal_at(point), view_dir),
            Surface::Moon => self.light.shade(self.moon_color, moon.normal_at(point), view_dir),
            Surface::Ring(i) => self.rings[i].color,
        })
    }

    /// Trace every pixel of the display context between the near and far planes
    pub fn draw(&self, camera: &OrbitCamera, moon_position: Vec3, context: &DisplayContext) -> LayerOutput {
        let mut pixels = Vec::with_capacity(context.pixel_count());
        let mut alpha = Vec::with_capacity(context.pixel_count());
        let forward = camera.forward();

        for y in 0..context.height {
            for x in 0..context.width {
                let ray = camera.ray_for_pixel(x, y, context);
                // Clip planes are view depths; convert to distance along this ray
                let cos = ray.direction.dot(forward);
                let t_range = camera.near / cos..camera.far / cos;
                match self.trace_within(&ray, moon_position, t_range) {
                    Some(color) => {
                        pixels.push(color.with_alpha(255));
                        alpha.push(1.0);
                    }
                    None => {
                        pixels.push(Rgba::TRANSPARENT);
                        alpha.push(0.0);
                    }
                }
            }
        }

        LayerOutput::with_alpha(pixels, alpha)
    }
}

impl LayerLogic for BodiesScene {
    fn update(&self, _delta: f32, _frame: &FrameState) -> Self {
        self.clone()
    }

    fn render(&self, frame: &FrameState, context: &DisplayContext) -> LayerOutput {
        self.draw(&frame.camera, frame.moon_position, context)
    }
}
