// src/scene/material.rs
//! Surface descriptions for the three drawables.

use crate::math::Rgb;

/// Which faces a material draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn cull_mode(self) -> wgpu::Face {
        match self {
            Side::Front => wgpu::Face::Back,
            Side::Back => wgpu::Face::Front,
        }
    }
}

/// Metallic-roughness PBR surface for the opaque heart.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub side: Side,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Rgb(0xff6b9d),
            emissive: Rgb(0xff1744),
            emissive_intensity: 0.4,
            metalness: 0.3,
            roughness: 0.2,
            side: Side::Front,
        }
    }
}

/// Unlit translucent surface for the glow shell.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowMaterial {
    pub color: Rgb,
    pub opacity: f32,
    pub side: Side,
}

impl Default for GlowMaterial {
    fn default() -> Self {
        Self { color: Rgb(0xff6b9d), opacity: 0.3, side: Side::Back }
    }
}

/// Additive sprites for the particle shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Rgb,
    /// Sprite edge length in world units.
    pub size: f32,
    pub opacity: f32,
    /// Shrink sprites with distance like any other world-space geometry.
    pub size_attenuation: bool,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self { color: Rgb(0xff6b9d), size: 0.05, opacity: 0.6, size_attenuation: true }
    }
}
