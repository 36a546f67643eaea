//! Decorative twinkling star layer, independent of the orbit clock.

use std::sync::Arc;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::canvas::{Canvas, DrawOp};
use super::display_context::DisplayContext;
use super::frame::FrameState;
use super::layer::{LayerLogic, LayerOutput};
use crate::camera::OrbitCamera;
use crate::math::Color;

/// World-space point size before perspective attenuation
pub const STAR_SIZE: f32 = 0.1;

/// Smallest on-screen star radius in pixels
const MIN_RADIUS_PX: f32 = 0.5;

/// Star parameters; positions fill a cube of half-width `spread` around the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldParams {
    pub count: usize,
    pub spread: f32,
    pub seed: u64,
    /// Multiplies every per-star opacity
    pub base_opacity: f32,
    pub color: Color,
}

/// Point stars with per-star opacity, re-rolled on each twinkle
#[derive(Debug, Clone)]
pub struct Starfield {
    positions: Arc<[Vec3]>,
    opacities: Vec<f32>,
    rng: ChaCha8Rng,
    base_opacity: f32,
    color: Color,
}

impl Starfield {
    pub fn generate(params: &StarfieldParams) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let spread = params.spread;

        let positions: Arc<[Vec3]> = (0..params.count)
            .map(|_| {
                Vec3::new(
                    (rng.random::<f32>() - 0.5) * 2.0 * spread,
                    (rng.random::<f32>() - 0.5) * 2.0 * spread,
                    (rng.random::<f32>() - 0.5) * 2.0 * spread,
                )
            })
            .collect();
        let opacities = (0..params.count).map(|_| rng.random::<f32>()).collect();

        log::debug!("Generated {} stars (seed {})", params.count, params.seed);

        Self {
            positions,
            opacities,
            rng,
            base_opacity: params.base_opacity,
            color: params.color,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-star opacity in [0, 1), before the base opacity is applied
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// New field with every opacity re-rolled; positions are shared
    pub fn twinkle(&self) -> Self {
        let mut next = self.clone();
        for opacity in next.opacities.iter_mut() {
            *opacity = next.rng.random::<f32>();
        }
        next
    }

    /// Rasterize visible stars onto a transparent canvas
    pub fn draw(&self, camera: &OrbitCamera, context: &DisplayContext) -> Canvas {
        let ops = self
            .positions
            .iter()
            .zip(&self.opacities)
            .filter_map(|(&position, &opacity)| {
                let screen = camera.project(position, context)?;
                let alpha = (opacity * self.base_opacity).clamp(0.0, 1.0);
                let color = self.color.with_alpha((alpha * 255.0).round() as u8);
                let radius = 0.5 * STAR_SIZE * camera.pixels_per_unit(screen.depth, context);

                Some(if radius <= MIN_RADIUS_PX {
                    DrawOp::Point {
                        x: screen.x.floor() as i32,
                        y: screen.y.floor() as i32,
                        color,
                    }
                } else {
                    DrawOp::FilledCircle {
                        cx: screen.x,
                        cy: screen.y,
                        radius,
                        color,
                    }
                })
            });

        Canvas::new(context.width, context.height)
            .draw_all(ops)
            .execute_ops()
    }
}

impl LayerLogic for Starfield {
    fn update(&self, _delta: f32, _frame: &FrameState) -> Self {
        self.twinkle()
    }

    fn render(&self, frame: &FrameState, context: &DisplayContext) -> LayerOutput {
        self.draw(&frame.camera, context).into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(count: usize, seed: u64) -> StarfieldParams {
        StarfieldParams {
            count,
            spread: 1000.0,
            seed,
            base_opacity: 0.8,
            color: Color::WHITE,
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = Starfield::generate(&params(100, 7));
        let b = Starfield::generate(&params(100, 7));
        let c = Starfield::generate(&params(100, 8));

        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.opacities(), b.opacities());
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn stars_stay_inside_cube() {
        let field = Starfield::generate(&params(1000, 1));
        assert_eq!(field.len(), 1000);
        for p in field.positions() {
            assert!(p.abs().max_element() <= 1000.0);
        }
        assert!(field.opacities().iter().all(|&o| (0.0..1.0).contains(&o)));
    }

    #[test]
    fn twinkle_rerolls_opacity_only() {
        let field = Starfield::generate(&params(50, 3));
        let next = field.twinkle();

        assert_eq!(field.positions(), next.positions());
        assert_ne!(field.opacities(), next.opacities());
        assert_ne!(next.opacities(), next.twinkle().opacities());
    }

    #[test]
    fn star_in_front_of_camera_is_drawn() {
        let mut field = Starfield::generate(&params(0, 0));
        field.positions = Arc::from(vec![Vec3::new(0.0, 0.0, -200.0)]);
        field.opacities = vec![1.0];

        let camera = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, 75.0, 0.1, 1000.0);
        let ctx = DisplayContext::new(64, 48);
        let canvas = field.draw(&camera, &ctx);

        let lit: Vec<_> = canvas.alpha().iter().filter(|&&a| a > 0.0).collect();
        assert_eq!(lit.len(), 1);
        assert!((lit[0] - 0.8).abs() < 0.01);
    }

    #[test]
    fn stars_beyond_far_plane_are_culled() {
        let mut field = Starfield::generate(&params(0, 0));
        field.positions = Arc::from(vec![Vec3::new(0.0, 0.0, -1000.0)]);
        field.opacities = vec![1.0];

        let camera = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, 75.0, 0.1, 1000.0);
        let canvas = field.draw(&camera, &DisplayContext::new(64, 48));
        assert!(canvas.alpha().iter().all(|&a| a == 0.0));
    }
}
