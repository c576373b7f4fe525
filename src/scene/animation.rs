// src/scene/animation.rs
//! Per-frame transforms as a pure function of elapsed time.
//!
//! Nothing here accumulates between frames: calling [`frame_transforms`]
//! twice with the same `t` gives the same result, and a dropped frame simply
//! means one value was never computed.

use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Heart spin about +Y, rad/s.
    pub heart_spin: f32,
    /// Angular frequency of the heartbeat pulse, rad/s.
    pub pulse_rate: f32,
    /// Pulse amplitude around unit scale.
    pub pulse_amplitude: f32,
    /// Particle shell spin about +Y, rad/s.
    pub particle_spin: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            heart_spin: 0.3,
            pulse_rate: 2.0,
            pulse_amplitude: 0.1,
            particle_spin: 0.2,
        }
    }
}

/// The only mutable state of the scene, re-derived every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub elapsed: f32,
    pub heart_rotation: f32,
    pub heart_scale: f32,
    pub particle_rotation: f32,
}

impl FrameTransforms {
    /// World matrix of the heart group (spin, then uniform pulse).
    pub fn heart_group(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.heart_scale),
            Quat::from_rotation_y(self.heart_rotation),
            Vec3::ZERO,
        )
    }

    pub fn particle_group(&self) -> Mat4 {
        Mat4::from_rotation_y(self.particle_rotation)
    }
}

pub fn frame_transforms(config: &AnimationConfig, elapsed: f32) -> FrameTransforms {
    FrameTransforms {
        elapsed,
        heart_rotation: elapsed * config.heart_spin,
        heart_scale: 1.0 + (elapsed * config.pulse_rate).sin() * config.pulse_amplitude,
        particle_rotation: elapsed * config.particle_spin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_4, PI, TAU};

    fn at(t: f32) -> FrameTransforms {
        frame_transforms(&AnimationConfig::default(), t)
    }

    #[test]
    fn test_rest_pose_at_zero() {
        let f = at(0.0);
        assert_eq!(f.heart_rotation, 0.0);
        assert_eq!(f.heart_scale, 1.0);
        assert_eq!(f.particle_rotation, 0.0);
        assert_eq!(f.heart_group(), Mat4::IDENTITY);
    }

    #[test]
    fn test_quarter_pi_is_peak() {
        let f = at(FRAC_PI_4);
        assert!((f.heart_scale - 1.1).abs() < 1e-6);
        assert!((f.heart_rotation - 0.2356).abs() < 1e-4);
    }

    #[test]
    fn test_pulse_extremes_repeat_every_pi() {
        for k in 0..5 {
            let k = k as f32;
            assert!((at(FRAC_PI_4 + k * PI).heart_scale - 1.1).abs() < 1e-5);
            assert!((at(3.0 * FRAC_PI_4 + k * PI).heart_scale - 0.9).abs() < 1e-5);
        }
    }

    #[test]
    fn test_scale_stays_in_band() {
        for i in 0..10_000 {
            let s = at(i as f32 * 0.0137).heart_scale;
            assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&s), "scale {} out of band", s);
        }
    }

    #[test]
    fn test_rotation_is_linear_in_time() {
        for t in [0.5_f32, 3.0, 10.0, 100.0] {
            let f = at(t);
            let expected = (0.3 * t).rem_euclid(TAU);
            assert!((f.heart_rotation.rem_euclid(TAU) - expected).abs() < 1e-4);
            assert!((f.particle_rotation - 0.2 * t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_heart_and_particles_diverge() {
        let f = at(1000.0);
        assert!((f.heart_rotation / f.particle_rotation - 1.5).abs() < 1e-4);
        assert!(f.heart_rotation - f.particle_rotation > 99.0);
    }

    #[test]
    fn test_rederiving_is_idempotent() {
        let config = AnimationConfig::default();
        let t = 12.345;
        let first = frame_transforms(&config, t);
        // Unrelated frames in between must not influence the result.
        for i in 0..100 {
            let _ = frame_transforms(&config, i as f32);
        }
        assert_eq!(first, frame_transforms(&config, t));
    }

    #[test]
    fn test_group_matrix_scales_and_spins() {
        let f = at(FRAC_PI_4);
        let p = f.heart_group().transform_point3(Vec3::X);
        assert!((p.length() - f.heart_scale).abs() < 1e-5);
        // Rotation about +Y keeps points in the XZ plane.
        assert!(p.y.abs() < 1e-6);
        assert!((p.z + f.heart_scale * f.heart_rotation.sin()).abs() < 1e-5);
    }
}
