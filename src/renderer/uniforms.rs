// src/renderer/uniforms.rs
//! CPU mirrors of the WGSL uniform blocks in `pipelines::base::COMMON_WGSL`.
//!
//! Everything is packed as `Mat4`/`Vec4` so the Rust layout matches the
//! uniform address space rules without manual padding.

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::scene::material::{GlowMaterial, PointsMaterial, StandardMaterial};
use glam::{Mat4, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub proj: Mat4,
    pub light_view_proj: Mat4,
    pub camera_pos: Vec4,
    /// (width, height, 0, 0) in physical pixels.
    pub viewport: Vec4,
    pub fog_color: Vec4,
    /// (near, far, 0, 0) in view depth.
    pub fog_range: Vec4,
    pub ambient: Vec4,
    pub point_pos: [Vec4; 2],
    pub point_color: [Vec4; 2],
    /// xyz position, w = 1 when the spot casts shadows.
    pub spot_pos: Vec4,
    pub spot_dir: Vec4,
    pub spot_color: Vec4,
    /// (cone cos, full-strength cos, depth bias, shadow map size).
    pub spot_cone: Vec4,
}

impl FrameUniforms {
    pub fn new(camera: &Camera, viewport: (u32, u32), config: &SceneConfig) -> Self {
        let (w, h) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
        let lights = &config.lights;
        let spot = &lights.spot;

        Self {
            view: camera.view_matrix(),
            proj: camera.projection_matrix(w / h),
            light_view_proj: spot.shadow_view_proj(),
            camera_pos: camera.position.extend(1.0),
            viewport: Vec4::new(w, h, 0.0, 0.0),
            fog_color: config.fog.color.linear().extend(1.0),
            fog_range: Vec4::new(config.fog.near, config.fog.far, 0.0, 0.0),
            ambient: lights.ambient.color.scaled(lights.ambient.intensity, 0.0),
            point_pos: [lights.key.position.extend(1.0), lights.fill.position.extend(1.0)],
            point_color: [
                lights.key.color.scaled(lights.key.intensity, 0.0),
                lights.fill.color.scaled(lights.fill.intensity, 0.0),
            ],
            spot_pos: spot.position.extend(if spot.cast_shadow { 1.0 } else { 0.0 }),
            spot_dir: spot.direction().extend(0.0),
            spot_color: spot.color.scaled(spot.intensity, 0.0),
            spot_cone: Vec4::new(
                spot.cone_cos(),
                spot.penumbra_cos(),
                spot.shadow.bias,
                spot.shadow.map_size as f32,
            ),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    /// Linear base color, alpha = opacity.
    pub color: Vec4,
    /// Linear emissive color pre-multiplied by its intensity.
    pub emissive: Vec4,
    /// Material-specific scalars; see the constructors.
    pub params: Vec4,
}

impl ObjectUniforms {
    /// params = (metalness, roughness, 0, 0)
    pub fn standard(model: Mat4, m: &StandardMaterial) -> Self {
        Self {
            model,
            color: m.color.linear().extend(1.0),
            emissive: m.emissive.scaled(m.emissive_intensity, 0.0),
            params: Vec4::new(m.metalness, m.roughness, 0.0, 0.0),
        }
    }

    pub fn glow(model: Mat4, m: &GlowMaterial) -> Self {
        Self {
            model,
            color: m.color.linear().extend(m.opacity),
            emissive: Vec4::ZERO,
            params: Vec4::ZERO,
        }
    }

    /// params = (0, 0, size, size attenuation flag)
    pub fn points(model: Mat4, m: &PointsMaterial) -> Self {
        Self {
            model,
            color: m.color.linear().extend(m.opacity),
            emissive: Vec4::ZERO,
            params: Vec4::new(0.0, 0.0, m.size, if m.size_attenuation { 1.0 } else { 0.0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::math::Rgb;

    #[test]
    fn test_block_sizes_are_uniform_aligned() {
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniforms>() % 16, 0);
        // 3 matrices + 13 vec4s
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 3 * 64 + 13 * 16);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 64 + 3 * 16);
    }

    #[test]
    fn test_frame_from_defaults() {
        let config = SceneConfig::default();
        let camera = Camera::from_config(&CameraConfig::default());
        let u = FrameUniforms::new(&camera, (1280, 720), &config);

        assert_eq!(u.viewport.truncate().truncate(), glam::Vec2::new(1280.0, 720.0));
        assert_eq!(u.fog_range.x, 5.0);
        assert_eq!(u.fog_range.y, 15.0);
        assert_eq!(u.spot_pos.w, 1.0);
        assert!((u.spot_dir.truncate() - glam::Vec3::NEG_Y).length() < 1e-6);
        assert!(u.spot_cone.y > u.spot_cone.x, "full-strength cone is inside the edge");
        assert_eq!(u.spot_cone.w, 512.0);
        // Fill light is half as bright as the key light.
        let key = Rgb(0xff6b9d).linear();
        assert!((u.point_color[0].truncate() - key).length() < 1e-6);
        assert!((u.ambient.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_viewport_is_guarded() {
        let config = SceneConfig::default();
        let camera = Camera::from_config(&CameraConfig::default());
        let u = FrameUniforms::new(&camera, (0, 0), &config);
        assert!(u.proj.is_finite());
    }

    #[test]
    fn test_material_packing() {
        let config = SceneConfig::default();
        let heart = ObjectUniforms::standard(Mat4::IDENTITY, &config.heart_material);
        assert_eq!(heart.color.w, 1.0);
        assert_eq!(heart.params.x, 0.3);
        assert_eq!(heart.params.y, 0.2);
        let expected = Rgb(0xff1744).linear() * 0.4;
        assert!((heart.emissive.truncate() - expected).length() < 1e-6);

        let glow = ObjectUniforms::glow(Mat4::IDENTITY, &config.glow_material);
        assert_eq!(glow.color.w, 0.3);

        let points = ObjectUniforms::points(Mat4::IDENTITY, &config.particle_material);
        assert_eq!(points.color.w, 0.6);
        assert_eq!(points.params.z, 0.05);
        assert_eq!(points.params.w, 1.0);
    }
}
