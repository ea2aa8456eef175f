//! The binary entry point for the orrery viewer.

use clap::Parser;
use orrery_app::platform::PlatformDirs;
use orrery_app::viewer;
use orrery_config::CliArgs;

fn main() {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve_and_create() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            std::process::exit(1);
        }
    };

    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());
    let config = match viewer::load_config(&config_dir, &args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match viewer::run(&config, args.frames) {
        Ok(summary) => summary.log(),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
