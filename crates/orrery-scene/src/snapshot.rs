//! Renderer-facing description of one frame.

use glam::DVec3;
use orrery_lod::{AssetRef, Rgb, Tier};

/// Cloud shell radius relative to the body.
pub const CLOUD_SCALE: f64 = 1.01;
/// Cloud shell opacity.
pub const CLOUD_OPACITY: f32 = 0.4;
/// Ring inner radius relative to the body.
pub const RING_INNER: f64 = 1.2;
/// Ring outer radius relative to the body.
pub const RING_OUTER: f64 = 2.8;
/// Emissive intensity of light-emitting bodies.
pub const EMISSIVE_INTENSITY: f32 = 3.0;
/// Label height above the body's surface.
pub const LABEL_OFFSET: f64 = 15.0;

/// Cloud layer drawn over the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudLayer {
    pub texture: AssetRef,
    pub scale: f64,
    pub opacity: f32,
}

/// Flat annulus around the body's equator.
#[derive(Clone, Debug, PartialEq)]
pub struct RingLayer {
    pub texture: AssetRef,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub segments: u32,
}

/// How a body's sphere is shaded.
#[derive(Clone, Debug, PartialEq)]
pub enum Appearance {
    /// Flat colour while textures are unavailable.
    Placeholder { color: Rgb },
    /// Textured sphere with optional layers.
    Textured {
        tier: Tier,
        surface: AssetRef,
        clouds: Option<CloudLayer>,
        ring: Option<RingLayer>,
        /// Emissive tint and intensity for light-emitting bodies.
        emission: Option<(Rgb, f32)>,
    },
}

/// Name label shown while the pointer is over a body.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    /// World position, above the body.
    pub position: DVec3,
}

/// Thin annulus tracing a body's orbit around its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitGuide {
    pub center: DVec3,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub segments: u32,
}

/// One body to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// Slash-separated path, e.g. `Earth/Moon`.
    pub path: String,
    pub position: DVec3,
    pub radius: f64,
    /// Axial tilt about X, radians.
    pub tilt: f64,
    /// Self-rotation about the tilted Y axis, radians.
    pub rotation: f64,
    /// Sphere tessellation.
    pub segments: u32,
    pub appearance: Appearance,
    pub label: Option<Label>,
    pub orbit_guide: Option<OrbitGuide>,
    /// Distance from the camera this frame.
    pub camera_distance: f64,
}

/// Everything to draw this frame, parents before their moons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub items: Vec<DrawItem>,
}

impl FrameSnapshot {
    pub fn get(&self, path: &str) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.path == path)
    }

    /// Bodies still drawn as placeholders.
    pub fn placeholders(&self) -> impl Iterator<Item = &DrawItem> {
        self.items
            .iter()
            .filter(|item| matches!(item.appearance, Appearance::Placeholder { .. }))
    }
}
