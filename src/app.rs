use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::core::{
    Button, Controller, DisplayContext, FrameClock, OrbitClock, SurfaceRenderer, SystemTimeSource,
    Throttled, TimeSource, WinitController,
};
use crate::hud::{self, HudState};
use crate::simulation::Simulation;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const TELEMETRY_INTERVAL: f32 = 1.0;

/// Frames-per-second averaged over one-second windows
#[derive(Debug, Default)]
struct FpsCounter {
    frame_count: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    fn update(&mut self, delta: f32) {
        self.frame_count += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.elapsed;
            self.frame_count = 0;
            self.elapsed = 0.0;
        }
    }
}

pub struct App {
    config: SceneConfig,
    time: SystemTimeSource,
    simulation: Simulation,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    controller: WinitController,
    clock: FrameClock,
    fps: FpsCounter,
    telemetry: Throttled,
}

impl App {
    /// Start the orbit clock now; the window is created on `resumed`
    pub fn new(config: SceneConfig, orbit: OrbitClock, time: SystemTimeSource) -> Self {
        let simulation = Simulation::new(&config, orbit);

        Self {
            config,
            time,
            simulation,
            window: None,
            renderer: None,
            controller: WinitController::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            telemetry: Throttled::new(TELEMETRY_INTERVAL),
        }
    }

    fn frame_size(&self, window: &Window) -> DisplayContext {
        let size = window.inner_size();
        DisplayContext::scaled(size.width, size.height, self.config.window.render_scale)
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        self.fps.update(delta);

        let now = self.time.now_millis();
        let frame = self.simulation.advance(delta, now, &self.controller);
        self.controller.reset_deltas();

        if self.telemetry.try_tick(delta) {
            log::debug!(
                "fps {:.1}, speed {}x, moon angle {:.2}°, simulated {:.3} d",
                self.fps.fps,
                frame.orbit.speed,
                frame.orbit.angle_degrees(),
                frame.orbit.simulated_days()
            );
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let pixels = self.simulation.render(&frame, &renderer.frame_size());
        let hud_state = HudState::new(
            self.fps.fps,
            &frame.orbit,
            self.config.ui.show_fps,
            self.config.ui.speed_controls,
        );

        let mut clicked = None;
        let result = renderer.present(window, &pixels, |ctx| {
            clicked = hud::draw(ctx, &hud_state);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated; reconfigured");
            }
            Err(e) => log::warn!("Skipping frame: {e}"),
        }

        if let Some(preset) = clicked {
            self.simulation.select_speed(preset);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let settings = &self.config.window;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(settings.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(settings.width, settings.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let frame_size = self.frame_size(&window);
        let renderer = match pollster::block_on(SurfaceRenderer::new(window.clone(), frame_size)) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        let consumed = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => renderer.handle_event(window, &event),
            _ => false,
        };

        // Releases still reach the controller when egui took the event
        self.controller.process_routed(&event, consumed);
        if consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { .. } if self.controller.is_down(Button::Escape) => {
                event_loop.exit()
            }
            WindowEvent::Resized(size) => {
                if let Some(window) = &self.window {
                    let frame_size = self.frame_size(window);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(size.width, size.height, frame_size);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let now = self.time.now_millis();
        log::info!(
            "Exiting after {:.3} simulated days",
            self.simulation.orbit().simulated_elapsed_ms(now) / crate::core::MILLIS_PER_DAY
        );
    }
}
