// src/config.rs
//! Compiled-in configuration.
//!
//! The scene is decorative and has no runtime knobs; every parameter lives
//! here with its fixed default so the values are in one place and tests can
//! tweak copies (e.g. a fixed particle seed).

use crate::camera::{CameraConfig, OrbitConfig};
use crate::math::Rgb;
use crate::scene::lights::LightRig;
use crate::scene::material::{GlowMaterial, PointsMaterial, StandardMaterial};
use crate::scene::{AnimationConfig, ExtrudeSettings, ParticleConfig};
use glam::Vec3;

/// Fog that ramps in between two view depths.
#[derive(Debug, Clone, PartialEq)]
pub struct FogConfig {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self { color: Rgb(0x0a0e27), near: 5.0, far: 15.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub extrude: ExtrudeSettings,
    /// Translation applied to both heart meshes inside the heart group.
    pub heart_offset: Vec3,
    pub heart_material: StandardMaterial,
    pub glow_material: GlowMaterial,
    pub particles: ParticleConfig,
    pub particle_material: PointsMaterial,
    pub lights: LightRig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub background: Rgb,
    pub fog: FogConfig,
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            extrude: ExtrudeSettings::default(),
            heart_offset: Vec3::new(-0.5, -0.95, 0.0),
            heart_material: StandardMaterial::default(),
            glow_material: GlowMaterial::default(),
            particles: ParticleConfig::default(),
            particle_material: PointsMaterial::default(),
            lights: LightRig::default(),
            camera: CameraConfig::default(),
            orbit: OrbitConfig::default(),
            background: Rgb(0x0a0e27),
            fog: FogConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

/// Host window settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// MSAA sample count for the scene pass.
    pub sample_count: u32,
    pub loading_text: String,
    pub fallback_text: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Heart".to_string(),
            width: 1280,
            height: 720,
            sample_count: 4,
            loading_text: "Loading 3D Heart...".to_string(),
            fallback_text: "3D view unavailable".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_defaults_match_scene_parameters() {
        let c = SceneConfig::default();
        assert_eq!(c.extrude.depth, 0.4);
        assert_eq!(c.extrude.bevel_segments, 10);
        assert_eq!(c.extrude.steps, 2);
        assert_eq!(c.particles.count, 1000);
        assert_eq!(c.heart_material.color, Rgb(0xff6b9d));
        assert_eq!(c.heart_material.emissive, Rgb(0xff1744));
        assert_eq!(c.glow_material.opacity, 0.3);
        assert_eq!(c.particle_material.size, 0.05);
        assert_eq!(c.camera.position, Vec3::new(0.0, 0.0, 8.0));
        assert!(!c.orbit.enable_zoom && !c.orbit.enable_pan && c.orbit.auto_rotate);
        assert!((c.orbit.min_polar - PI / 3.0).abs() < 1e-6);
        assert!((c.orbit.max_polar - PI / 1.5).abs() < 1e-6);
        assert_eq!((c.fog.near, c.fog.far), (5.0, 15.0));
        assert_eq!(c.lights.spot.angle, 0.3);
        assert!(c.lights.spot.cast_shadow);
    }
}
