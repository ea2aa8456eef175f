//! Resolution tiers and sub-asset kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Asset resolution tier, ordered from least to most detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// All tiers from least to most detail.
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Directory and filename suffix used by the texture pipeline.
    pub fn suffix(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "med",
            Tier::High => "high",
        }
    }

    /// Pixel dimensions (equirectangular, 2:1) the texture pipeline resizes to.
    pub fn texture_size(self) -> (u32, u32) {
        match self {
            Tier::Low => (1024, 512),
            Tier::Medium => (2048, 1024),
            Tier::High => (4096, 2048),
        }
    }

    /// The next tier down, if any.
    pub fn lower(self) -> Option<Tier> {
        match self {
            Tier::Low => None,
            Tier::Medium => Some(Tier::Low),
            Tier::High => Some(Tier::Medium),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One of the textures layered onto a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubAssetKind {
    Surface,
    Clouds,
    Ring,
}

impl SubAssetKind {
    pub const ALL: [SubAssetKind; 3] = [
        SubAssetKind::Surface,
        SubAssetKind::Clouds,
        SubAssetKind::Ring,
    ];
}

impl fmt::Display for SubAssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubAssetKind::Surface => "surface",
            SubAssetKind::Clouds => "clouds",
            SubAssetKind::Ring => "ring",
        })
    }
}
