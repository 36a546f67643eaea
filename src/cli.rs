// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::{SceneConfig, SceneVariant};
use crate::error::ConfigError;

/// Default log filter; keeps GPU backends quiet unless asked
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// CLI values override the config file, which overrides the variant defaults
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "moon-orbit")]
#[command(about = "Earth and Moon with a time-scaled orbit clock", long_about = None)]
pub struct Cli {
    /// Scene preset to start from
    #[arg(long, value_enum)]
    pub variant: Option<SceneVariant>,

    /// JSON scene config layered over the variant
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial speed multiplier; 0 freezes the Moon, negative reverses it
    #[arg(long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Number of rings in the orbit plane (0-3)
    #[arg(long)]
    pub rings: Option<usize>,

    /// Hide the starfield
    #[arg(long = "no-stars", default_value = "false")]
    pub no_stars: bool,

    /// Disable UI elements
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height
    #[arg(long)]
    pub height: Option<u32>,

    /// Internal resolution as a fraction of the window (0.1-1.0)
    #[arg(long)]
    pub render_scale: Option<f32>,

    /// Log filter, e.g. "debug" or "info,moon_orbit=trace"
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Filter for env_logger: --log-level, then RUST_LOG, then the default
    pub fn log_filter(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

impl SceneConfig {
    /// Resolve the scene from variant, optional file and CLI flags, then validate
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => SceneConfig::load(path, cli.variant)?,
            None => SceneConfig::for_variant(cli.variant.unwrap_or_default()),
        };

        config.apply_cli_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides to a resolved config
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(speed) = cli.speed {
            self.orbit.initial_speed = speed;
        }
        if let Some(rings) = cli.rings {
            self.rings.count = rings;
        }
        if cli.no_stars {
            self.starfield.enabled = false;
        }
        if cli.no_ui {
            self.ui.speed_controls = false;
            self.ui.show_fps = false;
        }
        if let Some(width) = cli.width {
            self.window.width = width;
        }
        if let Some(height) = cli.height {
            self.window.height = height;
        }
        if let Some(scale) = cli.render_scale {
            self.window.render_scale = scale;
        }
    }
}
