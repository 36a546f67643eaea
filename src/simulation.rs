//! Frame stepping independent of the window: input, camera, orbit sample and layers.

use glam::Vec3;

use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::core::{
    BodiesScene, Button, Controller, DisplayContext, FrameState, LayerStack, OrbitClock, SpeedControl,
    SpeedPreset, Starfield, TimedLayer,
};
use crate::math::Color;

const STARFIELD_PRIORITY: i32 = 0;
const BODIES_PRIORITY: i32 = 10;

pub struct Simulation {
    orbit: OrbitClock,
    camera: OrbitCamera,
    layers: LayerStack,
    plane_y: f32,
    background: Color,
    frame_number: u64,
}

impl Simulation {
    /// Build the layer stack for `config` around an already started clock
    pub fn new(config: &SceneConfig, orbit: OrbitClock) -> Self {
        let camera = OrbitCamera::looking_at(
            Vec3::from_array(config.camera.position),
            Vec3::ZERO,
            config.camera.fov_degrees,
            config.camera.near,
            config.camera.far,
        );

        let mut layers = LayerStack::new().with_layer(Box::new(TimedLayer::every_frame(
            BodiesScene::new(config.build_rings()),
            BODIES_PRIORITY,
            "bodies",
        )));

        if let Some(params) = config.starfield_params() {
            layers = layers.with_layer(Box::new(TimedLayer::new(
                Starfield::generate(&params),
                config.starfield.twinkle_hz,
                STARFIELD_PRIORITY,
                "starfield",
            )));
        }

        log::info!(
            "Scene {:?}: {} ring(s), layers {:?}",
            config.variant,
            config.rings.count,
            layers.names()
        );

        Self {
            orbit,
            camera,
            layers,
            plane_y: config.orbit.plane_y,
            background: Color::BLACK,
            frame_number: 0,
        }
    }

    pub fn orbit(&self) -> &OrbitClock {
        &self.orbit
    }

    pub fn speed(&self) -> &SpeedControl {
        self.orbit.speed()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.names()
    }

    /// Select a speed preset, logging when the multiplier actually changes
    pub fn select_speed(&self, preset: SpeedPreset) {
        if self.speed().select(preset) {
            log::info!("Speed set to {}", preset.label());
        }
    }

    /// Step one frame at wall-clock `now_ms`
    pub fn advance(&mut self, delta: f32, now_ms: f64, controller: &dyn Controller) -> FrameState {
        if let Some(preset) = Button::SPEED_KEYS
            .iter()
            .position(|&key| controller.is_down(key))
            .and_then(SpeedPreset::from_index)
        {
            self.select_speed(preset);
        }

        self.camera.update(delta, controller);

        let orbit = self.orbit.sample(now_ms);
        let frame = FrameState::new(self.frame_number, delta, self.camera, orbit, self.plane_y);
        self.layers = self.layers.update(&frame);
        self.frame_number += 1;
        frame
    }

    /// Composite all layers for `frame` into opaque RGBA8
    pub fn render(&self, frame: &FrameState, context: &DisplayContext) -> Vec<u8> {
        self.layers.composite(frame, context, self.background)
    }
}
