//! Headless viewer run: load configuration, mount the scene, drive frames.

use std::path::Path;

use glam::DVec3;
use orrery_config::{CliArgs, Config, ConfigError};
use orrery_lod::Tier;
use orrery_orbit::{OrbitError, parse_date};
use orrery_scene::{
    Appearance, FrameInput, FrameSnapshot, FsAssetLoader, OrbitControls, Scene, SceneError,
    SceneSettings,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::frame_loop::{FIXED_DT, FrameLoop};
use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("render date: {0}")]
    Date(#[from] OrbitError),
}

/// Loads `config.ron` from `config_dir`, applies CLI overrides, and validates.
pub fn load_config(config_dir: &Path, args: &CliArgs) -> Result<Config, AppError> {
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(config)
}

/// Where one body ended up after the run.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySummary {
    pub path: String,
    pub position: DVec3,
    pub camera_distance: f64,
    /// Displayed tier, or `None` while drawn as a placeholder.
    pub tier: Option<Tier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub sim_time: f64,
    pub camera_position: DVec3,
    pub bodies: Vec<BodySummary>,
    /// Asset loads as (pending, ready, failed).
    pub loads: (usize, usize, usize),
}

impl RunSummary {
    fn new(
        frame_loop: &FrameLoop,
        controls: &OrbitControls,
        snapshot: &FrameSnapshot,
        loader: &FsAssetLoader,
    ) -> Self {
        let bodies = snapshot
            .items
            .iter()
            .map(|item| BodySummary {
                path: item.path.clone(),
                position: item.position,
                camera_distance: item.camera_distance,
                tier: match &item.appearance {
                    Appearance::Textured { tier, .. } => Some(*tier),
                    Appearance::Placeholder { .. } => None,
                },
            })
            .collect();

        Self {
            frames: frame_loop.frame_count(),
            sim_time: frame_loop.total_sim_time(),
            camera_position: controls.position(),
            bodies,
            loads: loader.counts(),
        }
    }

    pub fn log(&self) {
        let (pending, ready, failed) = self.loads;
        info!(
            "Rendered {} frames ({:.1}s simulated); textures: {ready} ready, {pending} pending, {failed} failed",
            self.frames, self.sim_time
        );
        for body in &self.bodies {
            let tier = body
                .tier
                .map_or_else(|| "placeholder".to_string(), |t| t.to_string());
            info!(
                "{:<14} ({:>9.1}, {:>9.1}) dist {:>8.1}  {tier}",
                body.path, body.position.x, body.position.z, body.camera_distance
            );
        }
    }
}

/// Mounts the configured catalog and renders `frames` fixed-rate frames.
///
/// Textures are resolved against the configured asset root; missing files
/// leave their bodies on placeholders rather than failing the run.
pub fn run(config: &Config, frames: u64) -> Result<RunSummary, AppError> {
    let settings = SceneSettings::from_config(config)?;
    let catalog = SceneSettings::load_catalog(config)?;
    let date = parse_date(&config.scene.date)?;

    info!(
        "Rendering {} bodies on {} from {}",
        catalog.walk().count(),
        date.format("%Y-%m-%d"),
        config.scene.asset_root.display()
    );

    let mut scene = Scene::new(catalog, settings);
    let mut loader = FsAssetLoader::new(config.scene.asset_root.clone());
    let mut controls = OrbitControls::new(&config.camera, &config.controls);
    let mut frame_loop = FrameLoop::new();
    let mut snapshot = FrameSnapshot::default();

    for _ in 0..frames {
        frame_loop.tick(FIXED_DT, |dt, _| controls.update(dt));
        let input = FrameInput {
            date,
            camera_position: controls.position(),
            pointer_over: None,
        };
        snapshot = scene.update(&input, &mut loader);

        if snapshot.frame % 60 == 0 {
            debug!(
                "frame {}: {} placeholders",
                snapshot.frame,
                snapshot.placeholders().count()
            );
        }
    }

    Ok(RunSummary::new(&frame_loop, &controls, &snapshot, &loader))
}
