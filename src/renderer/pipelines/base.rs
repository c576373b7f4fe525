// src/renderer/pipelines/base.rs
//! Shared utilities for the scene pipelines.
//!
//! Every scene pipeline binds the per-frame uniforms at group 0 and its own
//! object uniforms at group 1; the lit heart additionally samples the
//! spotlight's shadow map at group 2. The WGSL declarations for the first
//! two groups live here and are prepended to each pipeline's shader.

use std::borrow::Cow;
use wgpu::util::DeviceExt;

/// Depth format shared by the scene pass and the shadow map.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Creates a vertex buffer holding one billboard quad as two triangles.
///
/// Corners lie in [-1, 1]^2 and are expanded per instance in the vertex
/// shader.
pub fn quad_vertex_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    let corners: [[f32; 2]; 6] = [
        [-1.0, -1.0], [1.0, -1.0], [1.0, 1.0],
        [-1.0, -1.0], [1.0, 1.0], [-1.0, 1.0],
    ];

    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Sprite Quad VB"),
        contents: bytemuck::cast_slice(&corners),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

pub fn quad_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        }],
    }
}

/// Creates a bind group layout for a single uniform buffer.
///
/// # Arguments
/// * `device` - The GPU device
/// * `stages` - Which shader stages can access the uniform
pub fn single_uniform_bind_group_layout(
    device: &wgpu::Device,
    label: &str,
    stages: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: stages,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Depth texture plus comparison sampler, read by the lit fragment shader.
pub fn shadow_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Shadow Map BGL"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
    })
}

/// Frame and object layouts shared by every scene pipeline.
pub struct SceneLayouts {
    pub frame: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub shadow: wgpu::BindGroupLayout,
}

impl SceneLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            frame: single_uniform_bind_group_layout(
                device,
                "Frame UBO BGL",
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            ),
            object: single_uniform_bind_group_layout(
                device,
                "Object UBO BGL",
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            ),
            shadow: shadow_bind_group_layout(device),
        }
    }
}

/// Compiles `body` with the shared uniform declarations in front of it.
pub fn scene_shader(device: &wgpu::Device, label: &str, body: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(Cow::Owned(format!("{COMMON_WGSL}\n{body}"))),
    })
}

pub fn multisample(count: u32) -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count,
        mask: !0,
        alpha_to_coverage_enabled: false,
    }
}

/// Uniform blocks and color helpers shared by all scene shaders. Field order
/// mirrors `FrameUniforms` and `ObjectUniforms`.
pub const COMMON_WGSL: &str = r#"
struct Frame {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    viewport: vec4<f32>,
    fog_color: vec4<f32>,
    fog_range: vec4<f32>,
    ambient: vec4<f32>,
    point_pos: array<vec4<f32>, 2>,
    point_color: array<vec4<f32>, 2>,
    spot_pos: vec4<f32>,
    spot_dir: vec4<f32>,
    spot_color: vec4<f32>,
    spot_cone: vec4<f32>,
};
@group(0) @binding(0) var<uniform> F: Frame;

struct Object {
    model: mat4x4<f32>,
    color: vec4<f32>,
    emissive: vec4<f32>,
    params: vec4<f32>,
};
@group(1) @binding(0) var<uniform> O: Object;

// Linear fog ramp over view depth, eased at both ends.
fn apply_fog(color: vec3<f32>, view_depth: f32) -> vec3<f32> {
    let f = smoothstep(F.fog_range.x, F.fog_range.y, view_depth);
    return mix(color, F.fog_color.rgb, f);
}

// ACES filmic fit (Narkowicz).
fn tone_map(x: vec3<f32>) -> vec3<f32> {
    let a = 2.51;
    let b = 0.03;
    let c = 2.43;
    let d = 0.59;
    let e = 0.14;
    return clamp((x * (a * x + b)) / (x * (c * x + d) + e), vec3<f32>(0.0), vec3<f32>(1.0));
}
"#;
