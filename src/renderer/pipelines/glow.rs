// src/renderer/pipelines/glow.rs
use super::base::{multisample, scene_shader, SceneLayouts, DEPTH_FORMAT};
use crate::scene::material::Side;
use crate::scene::MeshVertex;

/// Unlit translucent shell drawn from the heart's own vertex buffer.
pub struct GlowPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl GlowPipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &SceneLayouts,
        color_fmt: wgpu::TextureFormat,
        sample_count: u32,
        side: Side,
    ) -> Self {
        let shader = scene_shader(device, "Glow WGSL", GLOW_WGSL);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Glow PL"),
            bind_group_layouts: &[&layouts.frame, &layouts.object],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Glow Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[MeshVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(side.cull_mode()),
                ..Default::default()
            },
            // Translucent: tested against the opaque heart, never occludes.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: multisample(sample_count),
            multiview: None,
        });

        Self { pipeline }
    }
}

pub const GLOW_WGSL: &str = r#"
struct VSIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VSOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) view_depth: f32,
};

@vertex
fn vs_main(in: VSIn) -> VSOut {
    let view_pos = F.view * O.model * vec4<f32>(in.position, 1.0);
    var out: VSOut;
    out.clip = F.proj * view_pos;
    out.view_depth = -view_pos.z;
    return out;
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    let color = apply_fog(tone_map(O.color.rgb), in.view_depth);
    return vec4<f32>(color, O.color.a);
}
"#;
