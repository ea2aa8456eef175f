//! Scene construction errors.

use orrery_bodies::CatalogError;
use orrery_lod::LodError;
use orrery_orbit::OrbitError;

/// Errors raised while building a scene from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("orbit settings: {0}")]
    Orbit(#[from] OrbitError),

    #[error("LOD settings: {0}")]
    Lod(#[from] LodError),

    #[error("body catalog: {0}")]
    Catalog(#[from] CatalogError),
}
