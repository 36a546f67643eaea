pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod hud;
pub mod math;
pub mod simulation;

pub use config::{SceneConfig, SceneVariant};
pub use error::{ConfigError, OrbitError};
