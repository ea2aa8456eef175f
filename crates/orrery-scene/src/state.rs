//! Per-body render state, owned by the body's scene node.

use glam::DVec3;
use orrery_lod::DisplayState;

/// Where a body is in its texture lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderPhase {
    /// The body declares no textures; it is always drawn as a placeholder.
    Untextured,
    /// Waiting on the low-tier surface texture.
    Loading,
    /// The low-tier surface texture failed to load.
    Failed,
    /// Textured, showing the given sub-assets.
    Ready(DisplayState),
}

impl RenderPhase {
    pub fn display(&self) -> Option<&DisplayState> {
        match self {
            RenderPhase::Ready(display) => Some(display),
            _ => None,
        }
    }
}

/// Frame-to-frame state of one body. Discarded with the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub phase: RenderPhase,
    /// World-space position resolved this frame.
    pub position: DVec3,
    /// Accumulated self-rotation about the body's axis, radians.
    pub rotation: f64,
    /// Pointer is over the body this frame.
    pub hovered: bool,
}

impl RenderState {
    pub fn new(textured: bool) -> Self {
        Self {
            phase: if textured {
                RenderPhase::Loading
            } else {
                RenderPhase::Untextured
            },
            position: DVec3::ZERO,
            rotation: 0.0,
            hovered: false,
        }
    }
}
