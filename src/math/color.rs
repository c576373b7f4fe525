// src/math/color.rs
//! sRGB hex colors and their linear-light equivalents.

use glam::{Vec3, Vec4};

/// An sRGB color authored as a hex triplet (e.g. `0xff6b9d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);

    /// Gamma-encoded channels in [0, 1].
    pub fn srgb(self) -> Vec3 {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        Vec3::new(r, g, b)
    }

    /// Linear-light channels, for lighting math and sRGB render targets.
    pub fn linear(self) -> Vec3 {
        let c = self.srgb();
        Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
    }

    /// Linear color scaled by `intensity`, with `w` left for the caller.
    pub fn scaled(self, intensity: f32, w: f32) -> Vec4 {
        (self.linear() * intensity).extend(w)
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let c = self.linear();
        wgpu::Color { r: c.x as f64, g: c.y as f64, b: c.z as f64, a: 1.0 }
    }

    pub fn to_egui(self) -> egui::Color32 {
        let [r, g, b] = [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8];
        egui::Color32::from_rgb(r, g, b)
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
