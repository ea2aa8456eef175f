//! Orbit-style camera controls: the camera circles a target at a bounded distance.

use std::f64::consts::{PI, TAU};

use glam::{DQuat, DVec3};
use orrery_config::{CameraConfig, ControlsConfig};

/// Keeps the polar angle away from the poles so the view never flips.
const POLAR_EPSILON: f64 = 1e-6;

/// Camera orbiting a fixed target.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    position: DVec3,
    target: DVec3,
    fov_degrees: f64,
    min_distance: f64,
    max_distance: f64,
    auto_rotate: bool,
    auto_rotate_speed: f64,
    damping_factor: f64,
    /// Pending (azimuth, polar) rotation not yet applied.
    pending: (f64, f64),
}

impl OrbitControls {
    pub fn new(camera: &CameraConfig, controls: &ControlsConfig) -> Self {
        let [x, y, z] = camera.position;
        let mut this = Self {
            position: DVec3::new(x, y, z),
            target: DVec3::ZERO,
            fov_degrees: camera.fov_degrees,
            min_distance: controls.min_distance,
            max_distance: controls.max_distance,
            auto_rotate: controls.auto_rotate,
            auto_rotate_speed: controls.auto_rotate_speed,
            damping_factor: controls.damping_factor,
            pending: (0.0, 0.0),
        };
        this.clamp_distance();
        this
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    pub fn fov_degrees(&self) -> f64 {
        self.fov_degrees
    }

    /// Distance from the camera to the target.
    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    /// Queue a drag rotation. Applied gradually by [`update`](Self::update).
    pub fn rotate(&mut self, azimuth: f64, polar: f64) {
        self.pending.0 += azimuth;
        self.pending.1 += polar;
    }

    /// Scale the distance to the target (`< 1` zooms in), clamped to the bounds.
    pub fn dolly(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.position = self.target + (self.position - self.target) * scale;
            self.clamp_distance();
        }
    }

    /// Advance by `dt` seconds: auto-rotate and apply damped pending rotation.
    pub fn update(&mut self, dt: f64) {
        let mut azimuth = 0.0;
        if self.auto_rotate {
            // One revolution per minute at speed 1.0.
            azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }

        let damping = if self.damping_factor > 0.0 {
            self.damping_factor
        } else {
            1.0
        };
        azimuth += self.pending.0 * damping;
        let polar = self.pending.1 * damping;
        self.pending.0 *= 1.0 - damping;
        self.pending.1 *= 1.0 - damping;

        let offset = self.position - self.target;
        let radius = offset.length();
        if radius == 0.0 {
            return;
        }

        let theta = offset.x.atan2(offset.z) + azimuth;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + polar)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        self.position = self.target
            + DVec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }

    /// Orientation looking from the camera toward the target, Y up.
    pub fn orientation(&self) -> DQuat {
        let forward = (self.target - self.position).normalize_or_zero();
        if forward == DVec3::ZERO {
            return DQuat::IDENTITY;
        }
        DQuat::from_rotation_arc(DVec3::NEG_Z, forward)
    }

    fn clamp_distance(&mut self) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance == 0.0 {
            return;
        }
        let clamped = distance.clamp(self.min_distance, self.max_distance);
        self.position = self.target + offset * (clamped / distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        OrbitControls::new(&CameraConfig::default(), &ControlsConfig::default())
    }

    #[test]
    fn test_initial_position_from_config() {
        let cam = controls();
        assert_eq!(cam.position(), DVec3::new(0.0, 600.0, 2200.0));
        assert_eq!(cam.fov_degrees(), 60.0);
    }

    #[test]
    fn test_dolly_clamped_to_bounds() {
        let mut cam = controls();
        cam.dolly(0.001);
        assert!((cam.distance() - 200.0).abs() < 1e-9);
        cam.dolly(1e6);
        assert!((cam.distance() - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn test_initial_distance_clamped() {
        let camera = CameraConfig {
            position: [0.0, 0.0, 50.0],
            ..CameraConfig::default()
        };
        let cam = OrbitControls::new(&camera, &ControlsConfig::default());
        assert!((cam.distance() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_auto_rotate_full_turn_per_minute_at_unit_speed() {
        let mut cam = OrbitControls::new(
            &CameraConfig {
                position: [0.0, 0.0, 1000.0],
                ..CameraConfig::default()
            },
            &ControlsConfig {
                auto_rotate_speed: 1.0,
                ..ControlsConfig::default()
            },
        );
        // A quarter of a minute is a quarter turn, clockwise seen from +Y.
        for _ in 0..900 {
            cam.update(1.0 / 60.0);
        }
        let p = cam.position();
        assert!((p.x + 1000.0).abs() < 1e-6, "{p:?}");
        assert!(p.z.abs() < 1e-6, "{p:?}");
        assert!((cam.distance() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_auto_rotate_preserves_height_and_distance() {
        let mut cam = controls();
        let before = cam.distance();
        for _ in 0..120 {
            cam.update(1.0 / 60.0);
        }
        assert!((cam.distance() - before).abs() < 1e-6);
        assert!((cam.position().y - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut cam = OrbitControls::new(
            &CameraConfig {
                position: [0.0, 0.0, 1000.0],
                ..CameraConfig::default()
            },
            &ControlsConfig {
                auto_rotate: false,
                ..ControlsConfig::default()
            },
        );
        cam.rotate(std::f64::consts::FRAC_PI_2, 0.0);
        cam.update(1.0 / 60.0);
        // Only a fraction applied on the first frame.
        assert!(cam.position().x > 0.0 && cam.position().x < 1000.0 * 0.1);
        for _ in 0..2000 {
            cam.update(1.0 / 60.0);
        }
        assert!((cam.position().x - 1000.0).abs() < 1e-3, "{:?}", cam.position());
    }

    #[test]
    fn test_polar_angle_clamped_at_pole() {
        let mut cam = controls();
        cam.rotate(0.0, -10.0);
        for _ in 0..2000 {
            cam.update(0.0);
        }
        let dir = cam.position().normalize();
        assert!(dir.y < 1.0 && dir.y > 0.999);
    }

    #[test]
    fn test_orientation_faces_target() {
        let cam = controls();
        let forward = cam.orientation() * DVec3::NEG_Z;
        let expected = (cam.target() - cam.position()).normalize();
        assert!((forward - expected).length() < 1e-9);
    }
}
