//! The sub-assets a body is currently showing, advanced once per frame.

use serde::{Deserialize, Serialize};

use crate::assets::{AssetRef, BodyAssets};
use crate::error::LodError;
use crate::selector::LodThresholds;
use crate::tier::{SubAssetKind, Tier};

/// How clouds and rings are chosen when the selected tier does not declare them.
///
/// The surface texture always follows the fallback chain, so it is never unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetentionPolicy {
    /// Use the nearest tier at or below the selected one that supplies the kind.
    /// Only when no such tier exists is the previously displayed asset kept.
    /// Result depends on history only for kinds the low tier omits.
    #[default]
    FallbackChain,
    /// Use the selected tier's own asset (medium borrows from low); otherwise
    /// keep whatever was displayed last frame.
    RetainLast,
}

/// Display state owned by one body's render node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub tier: Tier,
    pub surface: AssetRef,
    pub clouds: Option<AssetRef>,
    pub ring: Option<AssetRef>,
}

impl DisplayState {
    /// Low-tier sub-assets, shown as soon as the baseline finishes loading.
    ///
    /// Pass only the handles that are ready to draw; layers missing here stay
    /// unset until a later [`advance`](Self::advance) finds them.
    pub fn initial(assets: &BodyAssets) -> Result<Self, LodError> {
        let surface = assets.baseline().cloned().ok_or(LodError::MissingBaseline)?;
        Ok(Self {
            tier: Tier::Low,
            surface,
            clouds: assets.low.clouds.clone(),
            ring: assets.low.ring.clone(),
        })
    }

    /// The displayed asset for `kind`.
    pub fn get(&self, kind: SubAssetKind) -> Option<&AssetRef> {
        match kind {
            SubAssetKind::Surface => Some(&self.surface),
            SubAssetKind::Clouds => self.clouds.as_ref(),
            SubAssetKind::Ring => self.ring.as_ref(),
        }
    }

    /// Compute next frame's state from this one. Pure: `self` is not modified.
    pub fn advance(
        &self,
        distance: f64,
        thresholds: &LodThresholds,
        assets: &BodyAssets,
        policy: RetentionPolicy,
    ) -> Self {
        let tier = thresholds.select(distance);

        let surface = assets
            .resolve(tier, SubAssetKind::Surface)
            .cloned()
            .unwrap_or_else(|| self.surface.clone());

        let pick = |kind: SubAssetKind| -> Option<AssetRef> {
            let chosen = match policy {
                RetentionPolicy::FallbackChain => assets.resolve(tier, kind),
                RetentionPolicy::RetainLast => match tier {
                    Tier::Medium => assets
                        .own(Tier::Medium, kind)
                        .or_else(|| assets.own(Tier::Low, kind)),
                    _ => assets.own(tier, kind),
                },
            };
            chosen.or_else(|| self.get(kind)).cloned()
        };

        Self {
            tier,
            surface,
            clouds: pick(SubAssetKind::Clouds),
            ring: pick(SubAssetKind::Ring),
        }
    }
}
