use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use moon_orbit::camera::OrbitCamera;
use moon_orbit::config::{SceneConfig, SceneVariant};
use moon_orbit::core::{
    orbit_position, BodiesScene, Button, Controller, DisplayContext, OrbitClock, OrbitConfig,
    SpeedControl, Starfield, MILLIS_PER_DAY,
};
use moon_orbit::simulation::Simulation;

struct Idle;

impl Controller for Idle {
    fn is_down(&self, _button: Button) -> bool {
        false
    }

    fn get_down_keys(&self) -> &[Button] {
        &[]
    }
}

/// Benchmark: orbit kernel at each speed preset
fn bench_orbit_position(c: &mut Criterion) {
    let period = 27.3 * MILLIS_PER_DAY;
    let start = 1_700_000_000_000.0;
    let mut group = c.benchmark_group("orbit_position");

    for speed in [1.0, 10000.0, -10.0] {
        group.bench_with_input(BenchmarkId::from_parameter(speed), &speed, |b, &speed| {
            let mut now = start;
            b.iter(|| {
                now += 16.6;
                black_box(orbit_position(black_box(now), start, speed, 30.0, period))
            })
        });
    }

    group.finish();
}

/// Benchmark: full clock sample with the atomic speed read
fn bench_clock_sample(c: &mut Criterion) {
    let clock = OrbitClock::with_start(OrbitConfig::lunar(), 0.0, SpeedControl::new(1000.0).unwrap());

    c.bench_function("orbit_clock_sample", |b| {
        let mut now = 0.0;
        b.iter(|| {
            now += 16.6;
            black_box(clock.sample(black_box(now)))
        })
    });
}

/// Benchmark: ray-cast bodies layer at 160x120
fn bench_bodies_layer(c: &mut Criterion) {
    let config = SceneConfig::for_variant(SceneVariant::Deluxe);
    let scene = BodiesScene::new(config.build_rings());
    let camera = OrbitCamera::looking_at(Vec3::new(0.0, 10.0, 60.0), Vec3::ZERO, 75.0, 0.1, 1000.0);
    let ctx = DisplayContext::new(160, 120);

    c.bench_function("bodies_layer_160x120", |b| {
        b.iter(|| black_box(scene.draw(&camera, Vec3::new(30.0, 0.0, 0.0), &ctx)))
    });
}

/// Benchmark: star rasterization, 10k stars
fn bench_starfield(c: &mut Criterion) {
    let config = SceneConfig::for_variant(SceneVariant::Deluxe);
    let stars = Starfield::generate(&config.starfield_params().unwrap());
    let camera = OrbitCamera::looking_at(Vec3::new(0.0, 10.0, 60.0), Vec3::ZERO, 75.0, 0.1, 1000.0);
    let ctx = DisplayContext::new(160, 120);

    c.bench_function("starfield_twinkle", |b| b.iter(|| black_box(stars.twinkle())));
    c.bench_function("starfield_draw_160x120", |b| {
        b.iter(|| black_box(stars.draw(&camera, &ctx)))
    });
}

/// Benchmark: advance plus composite of a deluxe frame
fn bench_full_frame(c: &mut Criterion) {
    let config = SceneConfig::for_variant(SceneVariant::Deluxe);
    let orbit = OrbitClock::with_start(config.orbit_config().unwrap(), 0.0, SpeedControl::default());
    let mut sim = Simulation::new(&config, orbit);
    let ctx = DisplayContext::new(160, 120);

    c.bench_function("deluxe_frame_160x120", |b| {
        let mut now = 0.0;
        b.iter(|| {
            now += 16.6;
            let frame = sim.advance(1.0 / 60.0, now, &Idle);
            black_box(sim.render(&frame, &ctx))
        })
    });
}

criterion_group!(
    benches,
    bench_orbit_position,
    bench_clock_sample,
    bench_bodies_layer,
    bench_starfield,
    bench_full_frame
);
criterion_main!(benches);
