use moon_orbit::core::{
    orbit_position, ManualTimeSource, OrbitClock, OrbitConfig, Position, SpeedControl, SpeedPreset,
    MILLIS_PER_DAY,
};
use moon_orbit::OrbitError;

const RADIUS: f64 = 30.0;
const TOL: f64 = 1e-6;

fn period() -> f64 {
    27.3 * MILLIS_PER_DAY
}

fn assert_close(a: Position, b: Position) {
    assert!(
        (a.x - b.x).abs() < TOL && (a.z - b.z).abs() < TOL,
        "{a:?} != {b:?}"
    );
}

#[test]
fn stays_on_circle_for_any_time_and_speed() {
    let start = 1_700_000_000_000.0;
    for speed in [0.0, 1.0, 10.0, 10000.0, -100.0, 3.7] {
        for step in 0..200 {
            let now = start + step as f64 * 123_456_789.0;
            let p = orbit_position(now, start, speed, RADIUS, period());
            assert!((p.x * p.x + p.z * p.z - RADIUS * RADIUS).abs() < 1e-6);
        }
    }
}

#[test]
fn repeats_every_period_over_speed() {
    let start = 5_000.0;
    for speed in [1.0, 10.0, 1000.0, -10.0] {
        let origin = orbit_position(start, start, speed, RADIUS, period());
        for k in 1..5 {
            let now = start + k as f64 * period() / speed.abs();
            assert_close(orbit_position(now, start, speed, RADIUS, period()), origin);
        }
    }
}

#[test]
fn unwrapped_angle_is_monotonic_for_positive_speed() {
    let clock = OrbitClock::with_start(OrbitConfig::lunar(), 0.0, SpeedControl::new(10000.0).unwrap());

    let mut last = f64::NEG_INFINITY;
    for step in 0..1000 {
        let angle = clock.unwrapped_angle_at(step as f64 * 3_600_000.0);
        assert!(angle >= last);
        last = angle;
    }
    assert!(last > std::f64::consts::TAU);
}

#[test]
fn wrapped_angle_stays_in_range() {
    let clock = OrbitClock::with_start(OrbitConfig::lunar(), 0.0, SpeedControl::new(-10000.0).unwrap());
    for step in 0..500 {
        let angle = clock.angle_at(step as f64 * 7_777_777.0);
        assert!((0.0..std::f64::consts::TAU).contains(&angle), "{angle}");
    }
}

#[test]
fn doubling_speed_and_halving_time_agree() {
    let start = 1_000.0;
    for elapsed in [0.0, 1.0, 86_400_000.0, 1e10, 3.3e11] {
        let a = orbit_position(start + elapsed, start, 2.0, RADIUS, period());
        let b = orbit_position(start + elapsed * 2.0, start, 1.0, RADIUS, period());
        assert_close(a, b);
    }
}

#[test]
fn real_time_quarter_orbit() {
    let p0 = orbit_position(0.0, 0.0, 1.0, RADIUS, period());
    assert_close(p0, Position::new(30.0, 0.0));

    let p1 = orbit_position(period() / 4.0, 0.0, 1.0, RADIUS, period());
    assert_close(p1, Position::new(0.0, 30.0));
}

#[test]
fn fast_forward_quarter_orbit() {
    let p = orbit_position(period() / 40000.0, 0.0, 10000.0, RADIUS, period());
    assert_close(p, Position::new(0.0, 30.0));
}

#[test]
fn start_instant_is_on_positive_x_for_every_speed() {
    for speed in [0.0, 1.0, -1.0, 10000.0, f64::MAX] {
        let p = orbit_position(42.0, 42.0, speed, RADIUS, period());
        assert_eq!(p, Position::new(RADIUS, 0.0));
    }
}

#[test]
fn zero_speed_freezes_and_negative_reverses() {
    let frozen = OrbitClock::with_start(OrbitConfig::lunar(), 0.0, SpeedControl::new(0.0).unwrap());
    assert_eq!(frozen.position_at(1e12), Position::new(RADIUS, 0.0));

    let reverse = OrbitClock::with_start(OrbitConfig::lunar(), 0.0, SpeedControl::new(-1.0).unwrap());
    assert_close(reverse.position_at(period() / 4.0), Position::new(0.0, -30.0));
}

#[test]
fn invalid_periods_fail_construction() {
    assert_eq!(OrbitConfig::new(RADIUS, 0.0), Err(OrbitError::InvalidPeriod(0.0)));
    assert!(matches!(OrbitConfig::new(RADIUS, -1.0), Err(OrbitError::InvalidPeriod(_))));
    assert!(matches!(OrbitConfig::new(RADIUS, f64::NAN), Err(OrbitError::InvalidPeriod(_))));
    assert!(matches!(SpeedControl::new(f64::INFINITY), Err(OrbitError::NonFiniteSpeed(_))));
}

#[test]
fn preset_selection_is_shared_between_handles() {
    let source = ManualTimeSource::new(0.0);
    let clock = OrbitClock::start(OrbitConfig::lunar(), &source, SpeedControl::default());
    let ui_handle = clock.speed().clone();

    assert!(ui_handle.select(SpeedPreset::X10000));
    assert!(!ui_handle.select(SpeedPreset::X10000));
    assert_eq!(clock.speed().preset(), Some(SpeedPreset::X10000));

    source.set(period() / 40000.0);
    assert_close(clock.position(&source), Position::new(0.0, 30.0));
}

#[test]
fn sample_reads_speed_once_consistently() {
    let clock = OrbitClock::with_start(OrbitConfig::lunar(), 0.0, SpeedControl::new(1000.0).unwrap());
    let now = 2.0 * MILLIS_PER_DAY;
    let sample = clock.sample(now);

    assert_eq!(sample.speed, 1000.0);
    assert_close(sample.position, clock.position_at(now));
    assert!((sample.angle - clock.angle_at(now)).abs() < 1e-12);
    assert!((sample.simulated_days() - 2000.0).abs() < 1e-9);
}

#[test]
fn long_sessions_keep_precision() {
    let start = 1_700_000_000_000.0;
    let now = start + 365.0 * MILLIS_PER_DAY;
    let p = orbit_position(now, start, 10000.0, RADIUS, period());
    assert!((p.x.hypot(p.z) - RADIUS).abs() < 1e-9);
}
