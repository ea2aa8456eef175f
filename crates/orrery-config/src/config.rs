//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What to show and when.
    pub scene: SceneConfig,
    /// Orbital distance scaling.
    pub orbit: OrbitConfig,
    /// Texture level-of-detail switching.
    pub lod: LodConfig,
    /// Tessellation levels.
    pub geometry: GeometryConfig,
    /// Initial camera.
    pub camera: CameraConfig,
    /// Orbit controls.
    pub controls: ControlsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Scene inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Date to render, `YYYY-MM-DD` or RFC 3339.
    pub date: String,
    /// Reference date orbital phases are measured from.
    pub epoch: String,
    /// Body catalog (`.ron` or `.json`). `None` uses the built-in solar system.
    pub bodies: Option<PathBuf>,
    /// Directory texture handles are resolved against.
    pub asset_root: PathBuf,
}

/// Orbital distance scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// World units per orbital distance unit.
    pub scale_factor: f64,
}

/// Which sub-asset a body keeps showing when its current tier omits one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Retention {
    /// Nearest lower tier that supplies it.
    #[default]
    FallbackChain,
    /// Whatever was on screen last frame.
    RetainLast,
}

/// Level-of-detail thresholds, as multiples of each body's radius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Closer than `radius * high_multiplier` selects the high tier.
    pub high_multiplier: f64,
    /// Closer than `radius * medium_multiplier` selects the medium tier.
    pub medium_multiplier: f64,
    /// Sub-asset retention policy.
    pub retention: Retention,
}

/// Tessellation levels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryConfig {
    /// Segments of a textured body sphere.
    pub sphere_segments: u32,
    /// Segments of a placeholder sphere.
    pub placeholder_segments: u32,
    /// Segments of a planetary ring.
    pub ring_segments: u32,
    /// Segments of an orbit guide ring.
    pub orbit_path_segments: u32,
}

/// Initial camera placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world units.
    pub position: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

/// Orbit-control bounds and motion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Closest zoom distance from the target.
    pub min_distance: f64,
    /// Farthest zoom distance from the target.
    pub max_distance: f64,
    /// Spin the camera around the target when idle.
    pub auto_rotate: bool,
    /// Auto-rotate speed; 1.0 is one revolution per minute.
    pub auto_rotate_speed: f64,
    /// Fraction of pending drag rotation applied per frame; zoom is immediate.
    pub damping_factor: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            date: "2025-12-18".to_string(),
            epoch: "2000-01-01".to_string(),
            bodies: None,
            asset_root: PathBuf::from("public"),
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self { scale_factor: 350.0 }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            high_multiplier: 80.0,
            medium_multiplier: 150.0,
            retention: Retention::FallbackChain,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            sphere_segments: 64,
            placeholder_segments: 32,
            ring_segments: 64,
            orbit_path_segments: 128,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 600.0, 2200.0],
            fov_degrees: 60.0,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            min_distance: 200.0,
            max_distance: 8000.0,
            auto_rotate: true,
            auto_rotate_speed: 0.2,
            damping_factor: 0.05,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values the viewer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} must be finite and positive"),
                })
            }
        };

        positive("orbit.scale_factor", self.orbit.scale_factor)?;
        positive("lod.high_multiplier", self.lod.high_multiplier)?;
        positive("lod.medium_multiplier", self.lod.medium_multiplier)?;
        if self.lod.high_multiplier >= self.lod.medium_multiplier {
            return Err(ConfigError::Invalid {
                field: "lod.high_multiplier",
                reason: "must be smaller than lod.medium_multiplier".to_string(),
            });
        }

        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("controls.min_distance", self.controls.min_distance)?;
        if self.controls.max_distance < self.controls.min_distance {
            return Err(ConfigError::Invalid {
                field: "controls.max_distance",
                reason: "must not be smaller than controls.min_distance".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.controls.damping_factor) {
            return Err(ConfigError::Invalid {
                field: "controls.damping_factor",
                reason: format!("{} is outside [0, 1]", self.controls.damping_factor),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("scale_factor: 350.0"));
        assert!(ron_str.contains("medium_multiplier: 150.0"));
        assert!(ron_str.contains("date: \"2025-12-18\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(scene: (date: \"2030-06-01\"), lod: (retention: RetainLast))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene.date, "2030-06-01");
        assert_eq!(config.scene.epoch, "2000-01-01");
        assert_eq!(config.lod.retention, Retention::RetainLast);
        assert_eq!(config.lod.high_multiplier, 80.0);
        assert_eq!(config.controls, ControlsConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.orbit.scale_factor = 500.0;
        config.scene.bodies = Some(PathBuf::from("bodies.json"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.lod.medium_multiplier = 200.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().lod.medium_multiplier, 200.0);
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_multipliers() {
        let mut config = Config::default();
        config.lod.high_multiplier = 200.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("lod.high_multiplier"));
    }

    #[test]
    fn test_validate_rejects_bad_zoom_bounds() {
        let mut config = Config::default();
        config.controls.max_distance = 100.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.orbit.scale_factor = 0.0;
        assert!(config.validate().is_err());
    }
}
