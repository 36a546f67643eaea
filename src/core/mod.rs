mod bodies;
mod canvas;
mod clock;
mod controller;
mod display_context;
mod frame;
mod gpu_context;
mod input_adapter;
mod layer;
mod orbit;
mod ring;
mod speed;
mod sphere;
mod starfield;
mod surface_renderer;
mod timer;

pub use bodies::{BodiesScene, DirectionalLight};
pub use canvas::{Canvas, DrawOp};
pub use clock::{FrameClock, ManualTimeSource, SystemTimeSource, TimeSource};
pub use controller::{Button, Controller};
pub use display_context::DisplayContext;
pub use frame::FrameState;
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use layer::{Layer, LayerLogic, LayerOutput, LayerStack, TimedLayer};
pub use orbit::{
    orbit_position, OrbitClock, OrbitConfig, OrbitSample, Position, LUNAR_ORBIT_RADIUS,
    LUNAR_PERIOD_DAYS, MILLIS_PER_DAY,
};
pub use ring::Ring;
pub use speed::{SpeedControl, SpeedPreset};
pub use sphere::Sphere;
pub use starfield::{Starfield, StarfieldParams, STAR_SIZE};
pub use surface_renderer::SurfaceRenderer;
pub use timer::{FixedHz, Throttled};
