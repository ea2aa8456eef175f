//! Level-of-detail texture selection: distance-based tier choice scaled by body
//! radius, per-kind sub-asset fallback, and the per-body display state carried
//! between frames.

mod assets;
mod display;
mod error;
mod placeholder;
mod selector;
mod tier;

pub use assets::{AssetRef, BodyAssets, TierAssets};
pub use display::{DisplayState, RetentionPolicy};
pub use error::LodError;
pub use placeholder::{EMISSIVE_COLOR, FALLBACK_COLOR, Rgb, SOLID_COLOR, placeholder_color};
pub use selector::{LodMultipliers, LodThresholds};
pub use tier::{SubAssetKind, Tier};
