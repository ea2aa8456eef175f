//! Per-tier texture references and the fallback chain between tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LodError;
use crate::tier::{SubAssetKind, Tier};

/// Opaque texture handle, resolved by the host asset loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Sub-assets supplied by a single tier. Every kind is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierAssets {
    pub surface: Option<AssetRef>,
    pub clouds: Option<AssetRef>,
    pub ring: Option<AssetRef>,
}

impl TierAssets {
    /// Surface-only tier.
    pub fn surface(handle: impl Into<String>) -> Self {
        Self {
            surface: Some(AssetRef::new(handle)),
            ..Self::default()
        }
    }

    /// Path produced by the texture pipeline: `<root>/<tier>/<base>_<tier>.<ext>`.
    pub fn pipeline_path(root: &str, base: &str, ext: &str, tier: Tier) -> AssetRef {
        let root = root.trim_end_matches('/');
        let suffix = tier.suffix();
        if root.is_empty() {
            AssetRef::new(format!("{suffix}/{base}_{suffix}.{ext}"))
        } else {
            AssetRef::new(format!("{root}/{suffix}/{base}_{suffix}.{ext}"))
        }
    }

    /// The handle for `kind`, if this tier supplies one.
    pub fn get(&self, kind: SubAssetKind) -> Option<&AssetRef> {
        match kind {
            SubAssetKind::Surface => self.surface.as_ref(),
            SubAssetKind::Clouds => self.clouds.as_ref(),
            SubAssetKind::Ring => self.ring.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.surface.is_none() && self.clouds.is_none() && self.ring.is_none()
    }

    fn handles(&self) -> impl Iterator<Item = (SubAssetKind, &AssetRef)> {
        SubAssetKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|h| (kind, h)))
    }
}

/// All texture tiers of one body. The low tier is the mandatory baseline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyAssets {
    pub low: TierAssets,
    pub medium: Option<TierAssets>,
    pub high: Option<TierAssets>,
}

impl BodyAssets {
    /// The sub-assets declared for exactly `tier`.
    pub fn tier(&self, tier: Tier) -> Option<&TierAssets> {
        match tier {
            Tier::Low => Some(&self.low),
            Tier::Medium => self.medium.as_ref(),
            Tier::High => self.high.as_ref(),
        }
    }

    /// The asset `tier` itself declares for `kind`, without falling back.
    pub fn own(&self, tier: Tier, kind: SubAssetKind) -> Option<&AssetRef> {
        self.tier(tier).and_then(|t| t.get(kind))
    }

    /// Nearest tier at or below `tier` that supplies `kind`.
    pub fn resolve(&self, tier: Tier, kind: SubAssetKind) -> Option<&AssetRef> {
        let mut current = Some(tier);
        while let Some(t) = current {
            if let Some(handle) = self.own(t, kind) {
                return Some(handle);
            }
            current = t.lower();
        }
        None
    }

    /// The mandatory baseline surface texture.
    pub fn baseline(&self) -> Option<&AssetRef> {
        self.low.surface.as_ref()
    }

    /// Every distinct handle across all tiers, low tier first.
    pub fn all_handles(&self) -> Vec<&AssetRef> {
        let mut out: Vec<&AssetRef> = Vec::new();
        for tier in Tier::ALL {
            if let Some(assets) = self.tier(tier) {
                for (_, handle) in assets.handles() {
                    if !out.contains(&handle) {
                        out.push(handle);
                    }
                }
            }
        }
        out
    }

    /// Check the baseline invariant and reject empty handles.
    pub fn validate(&self) -> Result<(), LodError> {
        for tier in Tier::ALL {
            if let Some(assets) = self.tier(tier) {
                for (kind, handle) in assets.handles() {
                    if handle.as_str().trim().is_empty() {
                        return Err(LodError::EmptyHandle { tier, kind });
                    }
                }
            }
        }

        let any = Tier::ALL
            .into_iter()
            .filter_map(|t| self.tier(t))
            .any(|t| !t.is_empty());
        if any && self.baseline().is_none() {
            return Err(LodError::MissingBaseline);
        }
        Ok(())
    }
}
