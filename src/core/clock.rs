use std::cell::Cell;
use std::time::Instant;

/// Source of wall-clock time in milliseconds
pub trait TimeSource {
    /// Current time in milliseconds, non-decreasing between calls
    fn now_millis(&self) -> f64;
}

/// Wall clock anchored to UTC at construction and advanced by a monotonic `Instant`,
/// so readings are epoch milliseconds that never step backwards
#[derive(Debug, Clone)]
pub struct SystemTimeSource {
    epoch_millis: f64,
    anchor: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            epoch_millis: chrono::Utc::now().timestamp_millis() as f64,
            anchor: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> f64 {
        self.epoch_millis + self.anchor.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven time source for tests and offline rendering
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: Cell<f64>,
}

impl ManualTimeSource {
    pub fn new(start_millis: f64) -> Self {
        Self {
            now: Cell::new(start_millis),
        }
    }

    pub fn set(&self, millis: f64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> f64 {
        self.now.get()
    }
}

/// Frame clock - tracks delta time between redraws
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Seconds since the previous tick; advances the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Restart measurement from now (e.g. after the window was occluded)
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
