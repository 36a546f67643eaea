//! Scene configuration: named variants, JSON overrides and validation.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{OrbitConfig, Ring, SpeedControl, StarfieldParams, LUNAR_ORBIT_RADIUS, LUNAR_PERIOD_DAYS};
use crate::error::ConfigError;
use crate::math::Color;

/// Most rings a scene may carry
pub const MAX_RINGS: usize = 3;
/// Most stars a starfield may generate
pub const MAX_STARS: usize = 1_000_000;

/// Built-in scene presets that a config file refines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneVariant {
    /// Earth and Moon only
    #[default]
    Classic,
    /// Rings, twinkling stars and the speed panel
    Deluxe,
}

/// Complete scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    pub orbit: OrbitSettings,
    pub rings: RingSettings,
    pub starfield: StarfieldSettings,
    pub camera: CameraSettings,
    pub ui: UiSettings,
    pub window: WindowSettings,
}

/// Moon orbit settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbitSettings {
    /// Orbit radius in scene units.
    pub radius: f64,
    /// Time for one revolution at 1x, in days.
    pub period_days: f64,
    /// Height of the orbit plane.
    pub plane_y: f32,
    /// Speed multiplier at startup.
    pub initial_speed: f64,
}

/// Concentric rings in the orbit plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingSettings {
    pub count: usize,
    /// Outer radius of the innermost ring.
    pub base_radius: f32,
    /// Added to the outer radius for each further ring.
    pub spacing: f32,
    /// Inner radius as a fraction of the outer radius.
    pub inner_radius_factor: f32,
    pub color: Color,
}

/// Background stars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StarfieldSettings {
    pub enabled: bool,
    pub count: usize,
    /// Half-width of the cube the stars fill.
    pub spread: f32,
    pub seed: u64,
    pub base_opacity: f32,
    /// Opacity re-rolls per second.
    pub twinkle_hz: f32,
}

/// Orbit camera start pose and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Overlay toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiSettings {
    /// Show the speed preset panel.
    pub speed_controls: bool,
    pub show_fps: bool,
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSettings {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Internal render resolution as a fraction of the window size.
    pub render_scale: f32,
    pub title: String,
}

impl SceneConfig {
    /// Defaults for `variant`
    pub fn for_variant(variant: SceneVariant) -> Self {
        let deluxe = variant == SceneVariant::Deluxe;

        Self {
            variant,
            orbit: OrbitSettings {
                radius: LUNAR_ORBIT_RADIUS,
                period_days: LUNAR_PERIOD_DAYS,
                plane_y: 0.0,
                initial_speed: 1.0,
            },
            rings: RingSettings {
                count: if deluxe { MAX_RINGS } else { 0 },
                base_radius: 5.0,
                spacing: 15.0,
                inner_radius_factor: 0.9,
                color: Color::from_hex(0x222277),
            },
            starfield: StarfieldSettings {
                enabled: deluxe,
                count: 10_000,
                spread: 1000.0,
                seed: 0x5eed,
                base_opacity: 0.8,
                twinkle_hz: 60.0,
            },
            camera: CameraSettings {
                position: if deluxe { [0.0, 10.0, 60.0] } else { [0.0, 0.0, 100.0] },
                fov_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
            },
            ui: UiSettings {
                speed_controls: deluxe,
                show_fps: true,
            },
            window: WindowSettings {
                width: 1280,
                height: 720,
                render_scale: 0.5,
                title: if deluxe { "Moon Orbit Deluxe" } else { "Moon Orbit" }.to_string(),
            },
        }
    }

    /// Parse JSON, filling anything it leaves out from the variant defaults.
    ///
    /// The base variant is `variant` when given, else the file's own
    /// `"variant"` key, else classic.
    pub fn from_json_str(json: &str, variant: Option<SceneVariant>) -> Result<Self, serde_json::Error> {
        let mut overrides: Value = serde_json::from_str(json)?;

        let file_variant = match overrides.get("variant") {
            Some(v) => Some(SceneVariant::deserialize(v)?),
            None => None,
        };
        let variant = variant.or(file_variant).unwrap_or_default();

        if let Some(map) = overrides.as_object_mut() {
            map.insert("variant".to_string(), serde_json::to_value(variant)?);
        }

        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        merge(&mut merged, overrides);
        serde_json::from_value(merged)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path, variant: Option<SceneVariant>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents, variant).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Check every range the renderer and orbit clock rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orbit_config()?;
        SpeedControl::new(self.orbit.initial_speed)?;

        if !self.orbit.plane_y.is_finite() {
            return Err(ConfigError::invalid("orbit.plane_y", "must be finite"));
        }

        let rings = &self.rings;
        if rings.count > MAX_RINGS {
            return Err(ConfigError::invalid(
                "rings.count",
                format!("at most {MAX_RINGS} rings are supported (got {})", rings.count),
            ));
        }
        if !(rings.base_radius.is_finite() && rings.base_radius > 0.0) {
            return Err(ConfigError::invalid("rings.base_radius", "must be positive"));
        }
        if !(rings.spacing.is_finite() && rings.spacing >= 0.0) {
            return Err(ConfigError::invalid("rings.spacing", "must not be negative"));
        }
        if !(0.0..1.0).contains(&rings.inner_radius_factor) {
            return Err(ConfigError::invalid("rings.inner_radius_factor", "must be in [0, 1)"));
        }

        let stars = &self.starfield;
        if stars.count > MAX_STARS {
            return Err(ConfigError::invalid(
                "starfield.count",
                format!("at most {MAX_STARS} stars are supported (got {})", stars.count),
            ));
        }
        if !(stars.spread.is_finite() && stars.spread > 0.0) {
            return Err(ConfigError::invalid("starfield.spread", "must be positive"));
        }
        if !(0.0..=1.0).contains(&stars.base_opacity) {
            return Err(ConfigError::invalid("starfield.base_opacity", "must be in [0, 1]"));
        }
        if !(stars.twinkle_hz.is_finite() && stars.twinkle_hz > 0.0) {
            return Err(ConfigError::invalid("starfield.twinkle_hz", "must be positive"));
        }

        let camera = &self.camera;
        if !camera.position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::invalid("camera.position", "must be finite"));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::invalid("camera.fov_degrees", "must be in (0, 180)"));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(ConfigError::invalid("camera.far", "need 0 < near < far"));
        }

        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::invalid(
                "window",
                format!("size must be non-zero (got {}x{})", window.width, window.height),
            ));
        }
        if !(0.1..=1.0).contains(&window.render_scale) {
            return Err(ConfigError::invalid(
                "window.render_scale",
                format!("must be in [0.1, 1.0] (got {})", window.render_scale),
            ));
        }

        Ok(())
    }

    pub fn orbit_config(&self) -> Result<OrbitConfig, ConfigError> {
        Ok(OrbitConfig::from_days(self.orbit.radius, self.orbit.period_days)?)
    }

    pub fn speed_control(&self) -> Result<SpeedControl, ConfigError> {
        Ok(SpeedControl::new(self.orbit.initial_speed)?)
    }

    /// Rings centred on the origin in the orbit plane
    pub fn build_rings(&self) -> Vec<Ring> {
        let rings = &self.rings;
        Ring::concentric(
            Vec3::new(0.0, self.orbit.plane_y, 0.0),
            rings.count,
            rings.base_radius,
            rings.spacing,
            rings.inner_radius_factor,
            rings.color,
        )
    }

    /// Star parameters when the starfield is enabled
    pub fn starfield_params(&self) -> Option<StarfieldParams> {
        let stars = &self.starfield;
        stars.enabled.then_some(StarfieldParams {
            count: stars.count,
            spread: stars.spread,
            seed: stars.seed,
            base_opacity: stars.base_opacity,
            color: Color::WHITE,
        })
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::for_variant(SceneVariant::default())
    }
}

/// Recursively overlay `patch` onto `base`; objects merge key by key, anything else replaces
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_in_decorations() {
        let classic = SceneConfig::for_variant(SceneVariant::Classic);
        let deluxe = SceneConfig::for_variant(SceneVariant::Deluxe);

        assert_eq!(classic.rings.count, 0);
        assert!(!classic.starfield.enabled);
        assert!(!classic.ui.speed_controls);
        assert_eq!(classic.camera.position, [0.0, 0.0, 100.0]);

        assert_eq!(deluxe.rings.count, 3);
        assert!(deluxe.starfield.enabled);
        assert!(deluxe.ui.speed_controls);
        assert_eq!(deluxe.camera.position, [0.0, 10.0, 60.0]);

        assert_eq!(classic.orbit, deluxe.orbit);
    }

    #[test]
    fn defaults_validate() {
        SceneConfig::for_variant(SceneVariant::Classic).validate().unwrap();
        SceneConfig::for_variant(SceneVariant::Deluxe).validate().unwrap();
    }

    #[test]
    fn merge_overlays_nested_objects() {
        let mut base = serde_json::json!({"a": {"x": 1, "y": 2}, "b": 3});
        merge(&mut base, serde_json::json!({"a": {"y": 5}, "c": 4}));
        assert_eq!(base, serde_json::json!({"a": {"x": 1, "y": 5}, "b": 3, "c": 4}));
    }

    #[test]
    fn empty_object_yields_variant_defaults() {
        let config = SceneConfig::from_json_str("{}", Some(SceneVariant::Deluxe)).unwrap();
        assert_eq!(config, SceneConfig::for_variant(SceneVariant::Deluxe));
    }

    #[test]
    fn starfield_params_follow_enabled_flag() {
        assert!(SceneConfig::for_variant(SceneVariant::Classic).starfield_params().is_none());
        let params = SceneConfig::for_variant(SceneVariant::Deluxe).starfield_params().unwrap();
        assert_eq!(params.count, 10_000);
        assert_eq!(params.base_opacity, 0.8);
    }

    #[test]
    fn rings_sit_in_orbit_plane() {
        let mut config = SceneConfig::for_variant(SceneVariant::Deluxe);
        config.orbit.plane_y = 2.0;
        let rings = config.build_rings();
        assert_eq!(rings.len(), 3);
        assert!(rings.iter().all(|r| r.center.y == 2.0));
    }
}
