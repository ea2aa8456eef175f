//! Radius-relative distance thresholds for tier selection.

use serde::{Deserialize, Serialize};

use crate::error::LodError;
use crate::tier::Tier;

/// Distance multipliers, relative to a body's radius, at which tiers switch.
///
/// Scaling by radius keeps switching scale-invariant: a moon and a gas giant
/// change tier at the same apparent size rather than at the same world distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodMultipliers {
    high: f64,
    medium: f64,
}

impl LodMultipliers {
    /// Validate and build. Requires `0 < high < medium`.
    pub fn new(high: f64, medium: f64) -> Result<Self, LodError> {
        let valid = high.is_finite() && medium.is_finite() && high > 0.0 && high < medium;
        if !valid {
            return Err(LodError::InvalidMultipliers { high, medium });
        }
        Ok(Self { high, medium })
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn medium(&self) -> f64 {
        self.medium
    }

    /// Thresholds for a body of the given radius.
    pub fn thresholds_for(&self, radius: f64) -> LodThresholds {
        LodThresholds {
            high: radius * self.high,
            medium: radius * self.medium,
        }
    }
}

impl Default for LodMultipliers {
    fn default() -> Self {
        Self {
            high: 80.0,
            medium: 150.0,
        }
    }
}

/// World-space distance thresholds for one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodThresholds {
    /// Below this distance the high tier is selected.
    pub high: f64,
    /// Below this distance (and not below `high`) the medium tier is selected.
    pub medium: f64,
}

impl LodThresholds {
    /// Shorthand for `multipliers.thresholds_for(radius)`.
    pub fn for_radius(radius: f64, multipliers: &LodMultipliers) -> Self {
        multipliers.thresholds_for(radius)
    }

    /// Select the tier for a camera at `distance` from the body centre.
    ///
    /// Comparisons are strict: a camera exactly on a threshold gets the coarser tier.
    /// A NaN distance compares false everywhere and selects `Low`.
    pub fn select(&self, distance: f64) -> Tier {
        if distance < self.high {
            Tier::High
        } else if distance < self.medium {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}
