//! Scene parameters resolved from configuration.

use orrery_bodies::BodyCatalog;
use orrery_config::{Config, GeometryConfig, Retention};
use orrery_lod::{LodMultipliers, RetentionPolicy};
use orrery_orbit::{Epoch, OrbitCalculator};

use crate::error::SceneError;

/// Validated, typed view of the configuration the scene needs each frame.
#[derive(Clone, Debug)]
pub struct SceneSettings {
    pub calculator: OrbitCalculator,
    pub multipliers: LodMultipliers,
    pub retention: RetentionPolicy,
    pub geometry: GeometryConfig,
}

impl SceneSettings {
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        let epoch = Epoch::parse(&config.scene.epoch)?;
        let calculator = OrbitCalculator::new(epoch, config.orbit.scale_factor)?;
        let multipliers =
            LodMultipliers::new(config.lod.high_multiplier, config.lod.medium_multiplier)?;
        let retention = match config.lod.retention {
            Retention::FallbackChain => RetentionPolicy::FallbackChain,
            Retention::RetainLast => RetentionPolicy::RetainLast,
        };

        Ok(Self {
            calculator,
            multipliers,
            retention,
            geometry: config.geometry.clone(),
        })
    }

    /// Load the configured body catalog, or the built-in one when none is set.
    pub fn load_catalog(config: &Config) -> Result<BodyCatalog, SceneError> {
        let catalog = match &config.scene.bodies {
            Some(path) => BodyCatalog::load(path)?,
            None => BodyCatalog::builtin()?,
        };
        Ok(catalog)
    }
}
