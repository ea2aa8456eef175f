//! Command-line argument parsing for the orrery viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Solar system viewer")]
pub struct CliArgs {
    /// Date to render (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub date: Option<String>,

    /// Body catalog file (.ron or .json).
    #[arg(long)]
    pub bodies: Option<PathBuf>,

    /// Directory texture handles are resolved against.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// World units per orbital distance unit.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref date) = args.date {
            self.scene.date = date.clone();
        }
        if let Some(ref bodies) = args.bodies {
            self.scene.bodies = Some(bodies.clone());
        }
        if let Some(ref assets) = args.assets {
            self.scene.asset_root = assets.clone();
        }
        if let Some(scale) = args.scale {
            self.orbit.scale_factor = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
