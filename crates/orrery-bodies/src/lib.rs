//! Static celestial body descriptors: the body tree, its on-disk formats, and
//! fail-fast validation.

mod body;
mod catalog;
mod error;

pub use body::{CelestialBody, RotationDirection, TextureSet, DEFAULT_ROTATION_SPEED};
pub use catalog::{BodyCatalog, Walk};
pub use error::CatalogError;
