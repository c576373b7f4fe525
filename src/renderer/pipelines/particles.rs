// src/renderer/pipelines/particles.rs
use super::base::{multisample, quad_vertex_buffer, quad_vertex_layout, scene_shader, SceneLayouts, DEPTH_FORMAT};

/// Instanced square sprites, one instance per particle position.
pub struct ParticlePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub quad_vb: wgpu::Buffer,
}

/// Per-instance layout: a bare `[f32; 3]` position.
pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

impl ParticlePipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &SceneLayouts,
        color_fmt: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let shader = scene_shader(device, "Particles WGSL", PARTICLES_WGSL);
        let quad_vb = quad_vertex_buffer(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particles PL"),
            bind_group_layouts: &[&layouts.frame, &layouts.object],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particles Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[quad_vertex_layout(), instance_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    // Additive: overlapping sprites brighten.
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
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

        Self { pipeline, quad_vb }
    }

    pub fn draw<'a>(
        &'a self,
        rpass: &mut wgpu::RenderPass<'a>,
        instances: &'a wgpu::Buffer,
        count: u32,
    ) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw(0..6, 0..count);
    }
}

pub const PARTICLES_WGSL: &str = r#"
struct VSIn {
    @location(0) corner: vec2<f32>,
    @location(1) center: vec3<f32>,
};

struct VSOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) view_depth: f32,
};

@vertex
fn vs_main(in: VSIn) -> VSOut {
    let view_pos = F.view * O.model * vec4<f32>(in.center, 1.0);
    let depth = max(-view_pos.z, 1e-4);

    // Sprite edge in pixels; attenuated sprites scale with half the
    // viewport height over depth.
    var size_px = O.params.z;
    if (O.params.w > 0.5) {
        size_px = O.params.z * (0.5 * F.viewport.y) / depth;
    }

    var clip = F.proj * view_pos;
    let half_ndc = 0.5 * size_px * 2.0 / F.viewport.xy;
    clip = vec4<f32>(clip.xy + in.corner * half_ndc * clip.w, clip.zw);

    var out: VSOut;
    out.clip = clip;
    out.view_depth = depth;
    return out;
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    let color = apply_fog(tone_map(O.color.rgb), in.view_depth);
    return vec4<f32>(color, O.color.a);
}
"#;
