//! Scene composition: one render node per body, advanced once per frame.
//!
//! The host renderer supplies camera and pointer input plus an asset loader,
//! and receives a [`FrameSnapshot`] describing what to draw. Orbit positions
//! and texture tiers are recomputed every frame; the only state carried
//! between frames is each body's self-rotation and displayed sub-assets.

mod camera;
mod error;
mod loader;
mod scene;
mod settings;
mod snapshot;
mod state;

pub use camera::OrbitControls;
pub use error::SceneError;
pub use loader::{AssetLoader, FsAssetLoader, LoadStatus, ManualAssetLoader};
pub use scene::{FrameInput, Scene};
pub use settings::SceneSettings;
pub use snapshot::{
    Appearance, CLOUD_OPACITY, CLOUD_SCALE, CloudLayer, DrawItem, EMISSIVE_INTENSITY,
    FrameSnapshot, LABEL_OFFSET, Label, OrbitGuide, RING_INNER, RING_OUTER, RingLayer,
};
pub use state::{RenderPhase, RenderState};
