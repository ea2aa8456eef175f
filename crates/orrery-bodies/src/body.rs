//! A single celestial body and its moons.

use serde::{Deserialize, Serialize};

use orrery_lod::{BodyAssets, Tier, TierAssets};
use orrery_orbit::OrbitalParams;

/// Self-rotation per frame, in radians, when a body does not specify one.
pub const DEFAULT_ROTATION_SPEED: f64 = 0.001;

/// Sense of a body's self-rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    #[default]
    Prograde,
    Retrograde,
}

impl RotationDirection {
    pub fn sign(self) -> f64 {
        match self {
            RotationDirection::Prograde => 1.0,
            RotationDirection::Retrograde => -1.0,
        }
    }
}

/// Immutable descriptor of a star, planet, or moon.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    /// Sphere radius in world units.
    pub radius: f64,
    /// Orbit radius around the parent, in distance units.
    pub distance: f64,
    /// Orbital period in days; `None` or `0` for stationary bodies.
    pub period_days: Option<f64>,
    /// Orbital phase at the epoch, radians.
    pub initial_angle: f64,
    /// Axial tilt, degrees.
    pub tilt_degrees: f64,
    /// Self-rotation per frame, radians.
    pub rotation_speed: f64,
    pub rotation_direction: RotationDirection,
    /// Light-emitting (the star).
    pub emissive: bool,
    /// Texture tiers. `None` renders as a flat placeholder forever.
    pub assets: Option<BodyAssets>,
    pub moons: Vec<CelestialBody>,
}

impl CelestialBody {
    /// A bare body with defaults for everything but name and radius.
    pub fn new(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            distance: 0.0,
            period_days: None,
            initial_angle: 0.0,
            tilt_degrees: 0.0,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            rotation_direction: RotationDirection::Prograde,
            emissive: false,
            assets: None,
            moons: Vec::new(),
        }
    }

    pub fn orbit(&self) -> OrbitalParams {
        OrbitalParams {
            distance: self.distance,
            period_days: self.period_days,
            initial_angle: self.initial_angle,
        }
    }

    pub fn tilt_radians(&self) -> f64 {
        self.tilt_degrees.to_radians()
    }

    /// Signed self-rotation applied each frame.
    pub fn rotation_step(&self) -> f64 {
        self.rotation_speed * self.rotation_direction.sign()
    }
}

/// Shorthand for textures laid out by the resizing pipeline:
/// `<root>/<tier>/<name>_<tier>.<ext>` for each listed tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureSet {
    /// Base name of the surface texture.
    pub base: String,
    #[serde(default = "default_surface_ext")]
    pub ext: String,
    /// Base name of the cloud layer, if any.
    #[serde(default)]
    pub clouds: Option<String>,
    /// Base name of the ring texture, if any.
    #[serde(default)]
    pub ring: Option<String>,
    /// Extension for clouds and rings, which carry alpha.
    #[serde(default = "default_overlay_ext")]
    pub overlay_ext: String,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,
}

fn default_surface_ext() -> String {
    "jpg".to_string()
}

fn default_overlay_ext() -> String {
    "png".to_string()
}

fn default_tiers() -> Vec<Tier> {
    Tier::ALL.to_vec()
}

impl TextureSet {
    /// Expand into explicit tiers under `root`.
    pub fn expand(&self, root: &str) -> BodyAssets {
        let tier_assets = |tier: Tier| TierAssets {
            surface: Some(TierAssets::pipeline_path(root, &self.base, &self.ext, tier)),
            clouds: self
                .clouds
                .as_deref()
                .map(|base| TierAssets::pipeline_path(root, base, &self.overlay_ext, tier)),
            ring: self
                .ring
                .as_deref()
                .map(|base| TierAssets::pipeline_path(root, base, &self.overlay_ext, tier)),
        };

        let mut assets = BodyAssets::default();
        for &tier in &self.tiers {
            match tier {
                Tier::Low => assets.low = tier_assets(tier),
                Tier::Medium => assets.medium = Some(tier_assets(tier)),
                Tier::High => assets.high = Some(tier_assets(tier)),
            }
        }
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_lod::SubAssetKind;

    #[test]
    fn test_rotation_step_sign() {
        let mut venus = CelestialBody::new("Venus", 9.5);
        venus.rotation_speed = 0.002;
        assert_eq!(venus.rotation_step(), 0.002);
        venus.rotation_direction = RotationDirection::Retrograde;
        assert_eq!(venus.rotation_step(), -0.002);
    }

    #[test]
    fn test_new_body_is_stationary() {
        let sun = CelestialBody::new("Sun", 60.0);
        assert!(sun.orbit().is_stationary());
        assert_eq!(sun.rotation_step(), DEFAULT_ROTATION_SPEED);
    }

    #[test]
    fn test_texture_set_expansion() {
        let set = TextureSet {
            base: "earth".into(),
            ext: "jpg".into(),
            clouds: Some("earth_clouds".into()),
            ring: None,
            overlay_ext: "png".into(),
            tiers: vec![Tier::Low, Tier::High],
        };
        let assets = set.expand("/textures");
        assert_eq!(
            assets.baseline().unwrap().as_str(),
            "/textures/low/earth_low.jpg"
        );
        assert!(assets.medium.is_none());
        assert_eq!(
            assets.own(Tier::High, SubAssetKind::Clouds).unwrap().as_str(),
            "/textures/high/earth_clouds_high.png"
        );
        assert_eq!(assets.resolve(Tier::High, SubAssetKind::Ring), None);
    }
}
