// src/scene/mod.rs
//! CPU-side model of the heart scene.
//!
//! Everything here is built once per mount and never mutated afterwards;
//! the renderer uploads it and then only feeds per-frame transforms from
//! [`animation`].

pub mod animation;
pub mod extrude;
pub mod lights;
pub mod material;
pub mod outline;
pub mod particles;

use crate::config::SceneConfig;
use glam::{Mat4, Vec3};

pub use self::animation::{frame_transforms, AnimationConfig, FrameTransforms};
pub use self::extrude::{ExtrudeSettings, ExtrudedMesh, MeshVertex};
pub use self::outline::HeartOutline;
pub use self::particles::{ParticleConfig, ParticleField};

/// Extruded heart solid shared by the opaque body and the glow shell.
#[derive(Debug, Clone)]
pub struct HeartGeometry {
    outline: HeartOutline,
    mesh: ExtrudedMesh,
}

impl HeartGeometry {
    pub fn build(settings: &ExtrudeSettings) -> Self {
        let outline = HeartOutline::heart();
        let contour = outline.flatten(settings.curve_segments);
        let mesh = extrude::extrude(&contour, settings);
        Self { outline, mesh }
    }

    pub fn outline(&self) -> &HeartOutline {
        &self.outline
    }

    pub fn mesh(&self) -> &ExtrudedMesh {
        &self.mesh
    }
}

/// All construction-time data of one mounted scene.
pub struct HeartScene {
    pub config: SceneConfig,
    pub geometry: HeartGeometry,
    pub particles: ParticleField,
}

impl HeartScene {
    pub fn new(config: &SceneConfig) -> Self {
        let geometry = HeartGeometry::build(&config.extrude);
        let particles = ParticleField::generate(&config.particles);
        log::info!(
            "built heart scene: {} triangles, {} particles",
            geometry.mesh().triangle_count(),
            particles.len()
        );
        Self { config: config.clone(), geometry, particles }
    }

    /// Model matrix shared by both heart meshes for this frame.
    pub fn heart_model(&self, frame: &FrameTransforms) -> Mat4 {
        frame.heart_group() * Mat4::from_translation(self.config.heart_offset)
    }

    pub fn particle_model(&self, frame: &FrameTransforms) -> Mat4 {
        frame.particle_group()
    }

    /// Center of the heart mesh in its group's frame.
    pub fn heart_center(&self) -> Vec3 {
        let (lo, hi) = self.geometry.mesh().bounds();
        0.5 * (lo + hi) + self.config.heart_offset
    }
}
