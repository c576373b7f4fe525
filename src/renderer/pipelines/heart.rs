// src/renderer/pipelines/heart.rs
use super::base::{multisample, scene_shader, SceneLayouts, DEPTH_FORMAT};
use crate::scene::material::Side;
use crate::scene::MeshVertex;

/// Lit, shadow-receiving pipeline for the opaque heart body.
pub struct HeartPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl HeartPipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &SceneLayouts,
        color_fmt: wgpu::TextureFormat,
        sample_count: u32,
        side: Side,
    ) -> Self {
        let shader = scene_shader(device, "Heart WGSL", HEART_WGSL);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Heart PL"),
            bind_group_layouts: &[&layouts.frame, &layouts.object, &layouts.shadow],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Heart Pipeline"),
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
                    blend: None,
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
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

pub const HEART_WGSL: &str = r#"
@group(2) @binding(0) var shadow_map: texture_depth_2d;
@group(2) @binding(1) var shadow_sampler: sampler_comparison;

struct VSIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VSOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) view_depth: f32,
};

@vertex
fn vs_main(in: VSIn) -> VSOut {
    let world = O.model * vec4<f32>(in.position, 1.0);
    let view_pos = F.view * world;
    var out: VSOut;
    out.clip = F.proj * view_pos;
    out.world = world.xyz;
    // Model is rotation and uniform scale only, so the upper 3x3 keeps normals perpendicular.
    out.normal = (O.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.view_depth = -view_pos.z;
    return out;
}

const PI: f32 = 3.14159265;

fn d_ggx(n_h: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let d = n_h * n_h * (a2 - 1.0) + 1.0;
    return a2 / (PI * d * d);
}

fn v_smith(n_v: f32, n_l: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let gv = n_l * sqrt(n_v * n_v * (1.0 - a2) + a2);
    let gl = n_v * sqrt(n_l * n_l * (1.0 - a2) + a2);
    return 0.5 / max(gv + gl, 1e-5);
}

fn fresnel(f0: vec3<f32>, v_h: f32) -> vec3<f32> {
    return f0 + (vec3<f32>(1.0) - f0) * pow(1.0 - v_h, 5.0);
}

// Radiance reflected toward `v` from a light of `irradiance` arriving along `l`.
fn brdf(n: vec3<f32>, v: vec3<f32>, l: vec3<f32>, irradiance: vec3<f32>,
        diffuse: vec3<f32>, f0: vec3<f32>, alpha: f32) -> vec3<f32> {
    let n_l = clamp(dot(n, l), 0.0, 1.0);
    if (n_l <= 0.0) {
        return vec3<f32>(0.0);
    }
    let h = normalize(l + v);
    let n_v = clamp(abs(dot(n, v)), 1e-4, 1.0);
    let n_h = clamp(dot(n, h), 0.0, 1.0);
    let v_h = clamp(dot(v, h), 0.0, 1.0);
    let spec = fresnel(f0, v_h) * (v_smith(n_v, n_l, alpha) * d_ggx(n_h, alpha));
    return irradiance * n_l * (diffuse / PI + spec);
}

fn spot_shadow(world: vec3<f32>) -> f32 {
    let lp = F.light_view_proj * vec4<f32>(world, 1.0);
    let ndc = lp.xyz / lp.w;
    let uv = ndc.xy * vec2<f32>(0.5, -0.5) + vec2<f32>(0.5);
    let inside = all(uv >= vec2<f32>(0.0)) && all(uv <= vec2<f32>(1.0)) && ndc.z <= 1.0;
    let texel = 1.0 / F.spot_cone.w;
    var lit = 0.0;
    for (var y = -1; y <= 1; y++) {
        for (var x = -1; x <= 1; x++) {
            let offset = vec2<f32>(f32(x), f32(y)) * texel;
            lit += textureSampleCompareLevel(shadow_map, shadow_sampler, clamp(uv + offset, vec2<f32>(0.0), vec2<f32>(1.0)), ndc.z - F.spot_cone.z);
        }
    }
    return select(1.0, lit / 9.0, inside);
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let v = normalize(F.camera_pos.xyz - in.world);
    let base = O.color.rgb;
    let metalness = O.params.x;
    let alpha = max(O.params.y * O.params.y, 1e-3);
    let diffuse = base * (1.0 - metalness);
    let f0 = mix(vec3<f32>(0.04), base, metalness);

    // Light intensities are in the same units as the scene description; the
    // PI factor cancels the Lambert normalisation.
    var color = F.ambient.rgb * diffuse;

    for (var i = 0; i < 2; i++) {
        let l = normalize(F.point_pos[i].xyz - in.world);
        color += brdf(n, v, l, F.point_color[i].rgb * PI, diffuse, f0, alpha);
    }

    let to_spot = F.spot_pos.xyz - in.world;
    let l = normalize(to_spot);
    let cone = smoothstep(F.spot_cone.x, F.spot_cone.y, dot(-l, F.spot_dir.xyz));
    var shadow = 1.0;
    if (F.spot_pos.w > 0.5) {
        shadow = spot_shadow(in.world);
    }
    color += brdf(n, v, l, F.spot_color.rgb * PI * cone * shadow, diffuse, f0, alpha);

    color += O.emissive.rgb;
    color = apply_fog(tone_map(color), in.view_depth);
    return vec4<f32>(color, 1.0);
}
"#;
