//! LOD configuration errors.

/// Errors raised by malformed LOD multipliers or asset tiers.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LodError {
    /// Multipliers must be finite, positive, and ordered `high < medium`.
    #[error("invalid LOD multipliers: high={high}, medium={medium} (need 0 < high < medium)")]
    InvalidMultipliers {
        /// Distance multiplier for the high tier.
        high: f64,
        /// Distance multiplier for the medium tier.
        medium: f64,
    },

    /// A tier supplies sub-assets but the low tier has no surface texture.
    #[error("missing low-tier surface texture")]
    MissingBaseline,

    /// An asset handle was the empty string.
    #[error("empty {kind} asset handle at {tier} tier")]
    EmptyHandle {
        /// Tier holding the empty handle.
        tier: crate::Tier,
        /// Sub-asset kind holding the empty handle.
        kind: crate::SubAssetKind,
    },
}
