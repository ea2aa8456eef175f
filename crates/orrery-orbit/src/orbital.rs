//! Circular coplanar orbits: a body's phase angle grows linearly with time.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::epoch::Epoch;
use crate::error::OrbitError;

/// Inner radius of the orbit guide ring, as a fraction of the orbit radius.
pub const ORBIT_PATH_INNER: f64 = 0.99;
/// Outer radius of the orbit guide ring, as a fraction of the orbit radius.
pub const ORBIT_PATH_OUTER: f64 = 1.01;

/// Orbital parameters for a circular orbit in the reference plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitalParams {
    /// Orbit radius in abstract distance units (scaled to world units by the calculator).
    pub distance: f64,
    /// Orbital period in days. `None` or `0` means the body is stationary.
    pub period_days: Option<f64>,
    /// Phase angle at the epoch, in radians.
    pub initial_angle: f64,
}

impl OrbitalParams {
    /// Whether the body moves at all.
    pub fn is_stationary(&self) -> bool {
        !matches!(self.period_days, Some(p) if p != 0.0)
    }
}

/// Position on the reference plane. The plane-normal (Y) coordinate is always zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanarPosition {
    pub x: f64,
    pub z: f64,
}

impl PlanarPosition {
    /// The origin of the reference plane.
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    /// Lift into 3D world space with `y = 0`.
    pub fn to_world(self) -> DVec3 {
        DVec3::new(self.x, 0.0, self.z)
    }

    /// Distance from the origin.
    pub fn length(self) -> f64 {
        self.x.hypot(self.z)
    }
}

/// Orbital phase angle in radians after `elapsed_days`.
///
/// Unbounded: the angle is only ever consumed by `cos`/`sin`, so no wraparound
/// is applied. Stationary bodies always report `0`.
pub fn orbital_angle(params: &OrbitalParams, elapsed_days: f64) -> f64 {
    match params.period_days {
        Some(period) if period != 0.0 => (elapsed_days / period) * TAU + params.initial_angle,
        _ => 0.0,
    }
}

/// Project an orbital angle onto the reference plane.
pub fn planar_position(params: &OrbitalParams, angle: f64, scale_factor: f64) -> PlanarPosition {
    let radius = params.distance * scale_factor;
    PlanarPosition {
        x: radius * angle.cos(),
        z: radius * angle.sin(),
    }
}

/// Inner and outer world-space radii of the guide ring drawn along an orbit.
///
/// Returns `None` for bodies at the centre of their parent (distance 0).
pub fn orbit_path_radii(distance: f64, scale_factor: f64) -> Option<(f64, f64)> {
    if distance <= 0.0 {
        return None;
    }
    let radius = distance * scale_factor;
    Some((radius * ORBIT_PATH_INNER, radius * ORBIT_PATH_OUTER))
}

/// Maps dates to planar positions for a fixed epoch and distance scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCalculator {
    epoch: Epoch,
    scale_factor: f64,
}

impl OrbitCalculator {
    /// Create a calculator. `scale_factor` converts orbital distance units to world units.
    pub fn new(epoch: Epoch, scale_factor: f64) -> Result<Self, OrbitError> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(OrbitError::InvalidScale(scale_factor));
        }
        Ok(Self {
            epoch,
            scale_factor,
        })
    }

    /// The reference epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Distance units to world units.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Phase angle of `params` at `date`.
    pub fn angle_at(&self, params: &OrbitalParams, date: DateTime<Utc>) -> f64 {
        orbital_angle(params, self.epoch.elapsed_days(date))
    }

    /// Position of `params` at `date`, relative to the body it orbits.
    ///
    /// Stationary bodies sit at the origin whatever their distance.
    pub fn position_at(&self, params: &OrbitalParams, date: DateTime<Utc>) -> PlanarPosition {
        if params.is_stationary() {
            return PlanarPosition::ORIGIN;
        }
        let angle = self.angle_at(params, date);
        planar_position(params, angle, self.scale_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::parse_date;

    fn calculator() -> OrbitCalculator {
        OrbitCalculator::new(Epoch::calendar_2000(), 350.0).unwrap()
    }

    fn earthlike() -> OrbitalParams {
        OrbitalParams {
            distance: 1.0,
            period_days: Some(365.0),
            initial_angle: 0.0,
        }
    }

    #[test]
    fn test_quarter_year_scenario() {
        let calc = calculator();
        let date = parse_date("2000-04-01").unwrap();

        let angle = calc.angle_at(&earthlike(), date);
        assert!((angle - 91.0 / 365.0 * TAU).abs() < 1e-12);
        assert!((angle - 1.566).abs() < 1e-3, "angle = {angle}");

        let pos = calc.position_at(&earthlike(), date);
        assert!((pos.x - 350.0 * angle.cos()).abs() < 1e-9);
        assert!((pos.z - 350.0 * angle.sin()).abs() < 1e-9);
        assert!((pos.x - 1.507).abs() < 0.01, "x = {}", pos.x);
        assert!((pos.z - 350.0).abs() < 0.1, "z = {}", pos.z);
    }

    #[test]
    fn test_angle_is_linear_in_time() {
        let calc = calculator();
        let params = OrbitalParams {
            distance: 5.2,
            period_days: Some(4333.0),
            initial_angle: 0.7,
        };
        let d1 = parse_date("1987-06-15").unwrap();
        let d2 = parse_date("2031-02-03T18:30:00Z").unwrap();

        let days = (d2 - d1).num_milliseconds() as f64 / 86_400_000.0;
        let delta = calc.angle_at(&params, d2) - calc.angle_at(&params, d1);
        assert!((delta - TAU * days / 4333.0).abs() < 1e-9);
    }

    #[test]
    fn test_stationary_body_stays_at_origin() {
        let calc = calculator();
        let sun_without_period = OrbitalParams {
            distance: 3.0,
            period_days: None,
            initial_angle: 1.0,
        };
        let sun_zero_period = OrbitalParams {
            period_days: Some(0.0),
            ..sun_without_period
        };

        for date in ["1900-01-01", "2000-01-01", "2025-12-18", "2400-07-04"] {
            let date = parse_date(date).unwrap();
            for params in [&sun_without_period, &sun_zero_period] {
                assert_eq!(calc.angle_at(params, date), 0.0);
                assert_eq!(calc.position_at(params, date), PlanarPosition::ORIGIN);
            }
        }
    }

    #[test]
    fn test_zero_distance_collapses_to_origin() {
        let calc = calculator();
        let params = OrbitalParams {
            distance: 0.0,
            period_days: Some(27.3),
            initial_angle: 0.4,
        };
        let pos = calc.position_at(&params, parse_date("2010-10-10").unwrap());
        assert_eq!(pos.length(), 0.0);
    }

    #[test]
    fn test_negative_elapsed_time_is_valid() {
        let calc = calculator();
        let before = parse_date("1999-10-02").unwrap();
        let angle = calc.angle_at(&earthlike(), before);
        assert!(angle < 0.0);

        let pos = calc.position_at(&earthlike(), before);
        assert!((pos.length() - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_initial_angle_offsets_phase() {
        let calc = calculator();
        let params = OrbitalParams {
            initial_angle: std::f64::consts::FRAC_PI_2,
            ..earthlike()
        };
        let pos = calc.position_at(&params, Epoch::calendar_2000().instant());
        assert!(pos.x.abs() < 1e-9);
        assert!((pos.z - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_world_position_is_coplanar() {
        let pos = planar_position(&earthlike(), 2.0, 350.0).to_world();
        assert_eq!(pos.y, 0.0);
        assert!((pos.length() - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_orbit_path_radii() {
        assert_eq!(orbit_path_radii(0.0, 350.0), None);
        let (inner, outer) = orbit_path_radii(2.0, 350.0).unwrap();
        assert!((inner - 693.0).abs() < 1e-9);
        assert!((outer - 707.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        assert!(OrbitCalculator::new(Epoch::calendar_2000(), 0.0).is_err());
        assert!(OrbitCalculator::new(Epoch::calendar_2000(), f64::NAN).is_err());
    }
}
