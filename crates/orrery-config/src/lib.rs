//! Configuration for the orrery viewer.
//!
//! Settings persist to disk as `config.ron`, are overridable from the command
//! line via clap, and tolerate missing or unknown fields so older and newer
//! files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ControlsConfig, DebugConfig, GeometryConfig, LodConfig, OrbitConfig,
    Retention, SceneConfig,
};
pub use error::ConfigError;
