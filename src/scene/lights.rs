// src/scene/lights.rs
//! The fixed four-light rig: ambient fill, warm and cool point lights, and
//! a shadow-casting spotlight from above.

use crate::math::Rgb;
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    /// Half-angle of the cone, radians.
    pub angle: f32,
    /// Fraction of the cone that fades out, 0 = hard edge, 1 = fully soft.
    pub penumbra: f32,
    pub cast_shadow: bool,
    pub shadow: ShadowSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowSettings {
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
    pub bias: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self { map_size: 512, near: 0.5, far: 500.0, bias: 0.0005 }
    }
}

impl SpotLight {
    pub fn direction(&self) -> Vec3 {
        let dir = (self.target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            Vec3::NEG_Y
        } else {
            dir
        }
    }

    /// Cosine of the cone edge.
    pub fn cone_cos(&self) -> f32 {
        self.angle.cos()
    }

    /// Cosine of the angle inside which the light is at full strength.
    pub fn penumbra_cos(&self) -> f32 {
        (self.angle * (1.0 - self.penumbra)).cos()
    }

    /// View-projection of the shadow camera: a perspective frustum that just
    /// encloses the cone.
    pub fn shadow_view_proj(&self) -> Mat4 {
        let dir = self.direction();
        // Looking straight down makes +Y degenerate as an up vector.
        let up = if dir.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::Z } else { Vec3::Y };
        let view = Mat4::look_at_rh(self.position, self.target, up);
        let proj = Mat4::perspective_rh(2.0 * self.angle, 1.0, self.shadow.near, self.shadow.far);
        proj * view
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub key: PointLight,
    pub fill: PointLight,
    pub spot: SpotLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight { color: Rgb::WHITE, intensity: 0.5 },
            key: PointLight {
                position: Vec3::new(10.0, 10.0, 10.0),
                color: Rgb(0xff6b9d),
                intensity: 1.0,
            },
            fill: PointLight {
                position: Vec3::new(-10.0, -10.0, -10.0),
                color: Rgb(0xc06c84),
                intensity: 0.5,
            },
            spot: SpotLight {
                position: Vec3::new(0.0, 10.0, 0.0),
                target: Vec3::ZERO,
                color: Rgb(0xff6b9d),
                intensity: 1.0,
                angle: 0.3,
                penumbra: 1.0,
                cast_shadow: true,
                shadow: ShadowSettings::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_points_down() {
        let rig = LightRig::default();
        assert!((rig.spot.direction() - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_full_penumbra_fades_from_axis() {
        let spot = LightRig::default().spot;
        // Full strength only on the axis, zero at the cone edge.
        assert_eq!(spot.penumbra_cos(), 1.0);
        assert!((spot.cone_cos() - 0.3_f32.cos()).abs() < 1e-6);

        let half = SpotLight { penumbra: 0.5, ..spot };
        assert!((half.penumbra_cos() - 0.15_f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_shadow_camera_sees_origin() {
        let spot = LightRig::default().spot;
        let clip = spot.shadow_view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
