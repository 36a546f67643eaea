//! Orbit clock: maps scaled wall-clock time onto a circular orbit.

use std::f64::consts::TAU;

use glam::Vec3;

use super::clock::TimeSource;
use super::speed::SpeedControl;
use crate::error::OrbitError;

pub const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Sidereal month used by the default scene
pub const LUNAR_PERIOD_DAYS: f64 = 27.3;

/// Scene-unit distance between Earth and Moon in the default scene
pub const LUNAR_ORBIT_RADIUS: f64 = 30.0;

/// Point on the orbit plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Lift into scene space at height `y`
    pub fn to_vec3(self, y: f32) -> Vec3 {
        Vec3::new(self.x as f32, y, self.z as f32)
    }
}

/// Validated orbit radius and period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    radius: f64,
    period_ms: f64,
}

impl OrbitConfig {
    pub fn new(radius: f64, period_ms: f64) -> Result<Self, OrbitError> {
        if !(period_ms.is_finite() && period_ms > 0.0) {
            return Err(OrbitError::InvalidPeriod(period_ms));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(OrbitError::InvalidRadius(radius));
        }
        Ok(Self { radius, period_ms })
    }

    pub fn from_days(radius: f64, period_days: f64) -> Result<Self, OrbitError> {
        Self::new(radius, period_days * MILLIS_PER_DAY)
    }

    /// Moon at 30 units with a 27.3 day period
    pub fn lunar() -> Self {
        Self {
            radius: LUNAR_ORBIT_RADIUS,
            period_ms: LUNAR_PERIOD_DAYS * MILLIS_PER_DAY,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Radians per millisecond of scaled time
    pub fn angular_velocity(&self) -> f64 {
        TAU / self.period_ms
    }
}

/// Scaled elapsed time reduced to one period, in `[0, period)`.
///
/// `rem_euclid` keeps the phase non-negative for reversed clocks. A tiny
/// negative remainder can round up to exactly `period`; that folds back to 0.
fn orbit_phase(now: f64, start: f64, speed: f64, period: f64) -> f64 {
    let phase = ((now - start) * speed).rem_euclid(period);
    if phase >= period {
        0.0
    } else {
        phase
    }
}

/// Planar position of a body on a circular orbit.
///
/// Pure function of its inputs. `period` must be positive; [`OrbitConfig`]
/// enforces that for callers going through [`OrbitClock`].
pub fn orbit_position(now: f64, start: f64, speed: f64, radius: f64, period: f64) -> Position {
    let angle = TAU * orbit_phase(now, start, speed, period) / period;
    Position {
        x: radius * angle.cos(),
        z: radius * angle.sin(),
    }
}

/// Everything the frame needs from the clock, derived from a single speed read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub position: Position,
    /// Orbit angle wrapped to `[0, 2π)`
    pub angle: f64,
    pub simulated_elapsed_ms: f64,
    pub speed: f64,
}

impl OrbitSample {
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    pub fn simulated_days(&self) -> f64 {
        self.simulated_elapsed_ms / MILLIS_PER_DAY
    }
}

/// Orbit state for one session: fixed config, captured start time and a live speed cell
#[derive(Debug, Clone)]
pub struct OrbitClock {
    config: OrbitConfig,
    start_ms: f64,
    speed: SpeedControl,
}

impl OrbitClock {
    /// Start the session now, as read from `source`
    pub fn start(config: OrbitConfig, source: &dyn TimeSource, speed: SpeedControl) -> Self {
        Self::with_start(config, source.now_millis(), speed)
    }

    pub fn with_start(config: OrbitConfig, start_ms: f64, speed: SpeedControl) -> Self {
        Self {
            config,
            start_ms,
            speed,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Handle to the speed cell; clones write through to this clock
    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    pub fn position_at(&self, now: f64) -> Position {
        orbit_position(
            now,
            self.start_ms,
            self.speed.get(),
            self.config.radius,
            self.config.period_ms,
        )
    }

    pub fn position(&self, source: &dyn TimeSource) -> Position {
        self.position_at(source.now_millis())
    }

    pub fn simulated_elapsed_ms(&self, now: f64) -> f64 {
        (now - self.start_ms) * self.speed.get()
    }

    /// Angle without wrapping; grows for as long as the session runs
    pub fn unwrapped_angle_at(&self, now: f64) -> f64 {
        self.config.angular_velocity() * self.simulated_elapsed_ms(now)
    }

    /// Angle wrapped to `[0, 2π)`
    pub fn angle_at(&self, now: f64) -> f64 {
        TAU * orbit_phase(now, self.start_ms, self.speed.get(), self.config.period_ms)
            / self.config.period_ms
    }

    /// Read the speed once and derive position, angle and simulated time from it
    pub fn sample(&self, now: f64) -> OrbitSample {
        let speed = self.speed.get();
        let radius = self.config.radius;
        let period = self.config.period_ms;
        let angle = TAU * orbit_phase(now, self.start_ms, speed, period) / period;

        OrbitSample {
            position: Position::new(radius * angle.cos(), radius * angle.sin()),
            angle,
            simulated_elapsed_ms: (now - self.start_ms) * speed,
            speed,
        }
    }
}
