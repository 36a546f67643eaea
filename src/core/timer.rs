/// Delta-driven timers; each owns its accumulator and decides when to fire

/// Fires at a fixed rate. Used to pace layer updates such as star twinkle.
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Timer firing `hz` times per second
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Rate in Hz
    pub fn hz(&self) -> f32 {
        1.0 / self.interval
    }

    /// Feed elapsed seconds, true when an interval has been crossed.
    /// Long stalls fire once rather than replaying every missed interval.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator = (self.accumulator - self.interval).min(self.interval);
            true
        } else {
            false
        }
    }
}

/// Minimum interval between fires; first call fires immediately
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: min_interval,
        }
    }

    /// True if at least `min_interval` seconds passed since the last fire
    pub fn try_tick(&mut self, delta: f32) -> bool {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}
