use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use moon_orbit::app::App;
use moon_orbit::cli::Cli;
use moon_orbit::config::SceneConfig;
use moon_orbit::core::{OrbitClock, SystemTimeSource};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .parse_filters(&cli.log_filter())
        .init();

    let config = SceneConfig::from_cli(&cli).context("Invalid scene configuration")?;
    let orbit_config = config.orbit_config()?;
    let speed = config.speed_control()?;

    log::info!(
        "Variant {:?}: orbit radius {}, period {} days, speed {}x",
        config.variant,
        orbit_config.radius(),
        config.orbit.period_days,
        speed.get()
    );

    let time = SystemTimeSource::new();
    let orbit = OrbitClock::start(orbit_config, &time, speed);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, orbit, time);

    log::info!("Controls: drag or WASD to orbit, wheel or Q/E to zoom, 1-5 for speed, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
