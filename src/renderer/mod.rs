// src/renderer/mod.rs
//! The main rendering orchestrator. Owns the GPU context, render targets,
//! and all the individual render pass pipelines.

pub mod context;
pub mod pipelines;
pub mod targets;
pub mod uniforms;

use self::{
    context::GpuContext,
    pipelines::{
        base::SceneLayouts, glow::GlowPipeline, heart::HeartPipeline,
        particles::ParticlePipeline, shadow::ShadowPipeline,
    },
    targets::{RenderTargets, ShadowMap},
    uniforms::{FrameUniforms, ObjectUniforms},
};
use crate::camera::Camera;
use crate::config::{SceneConfig, ViewerConfig};
use crate::scene::{frame_transforms, FrameTransforms, HeartScene};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// A uniform buffer and the bind group exposing it.
pub struct UniformBinding {
    pub ubo: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    fn new<T: bytemuck::Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        value: &T,
    ) -> Self {
        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });
        Self { ubo, bind_group }
    }

    fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(value));
    }
}

/// GPU resources of one mounted heart scene.
///
/// Dropping this releases every buffer and bind group the scene owns; the
/// pipelines stay with the [`Renderer`].
pub struct SceneGpu {
    pub scene: HeartScene,
    /// Shared by the opaque body and the glow shell.
    heart_vb: wgpu::Buffer,
    heart_vertex_count: u32,
    particle_vb: wgpu::Buffer,
    particle_count: u32,
    heart: UniformBinding,
    glow: UniformBinding,
    particles: UniformBinding,
}

/// Owns all rendering-related state.
pub struct Renderer {
    pub context: GpuContext,
    pub targets: RenderTargets,
    pub pipelines: AllPipelines,
    pub egui_renderer: egui_wgpu::Renderer,
    layouts: SceneLayouts,
    shadow_map: ShadowMap,
    shadow_bg: wgpu::BindGroup,
    frame: UniformBinding,
    clear_color: wgpu::Color,
    cast_shadow: bool,
}

/// A container for all the render pass pipelines.
pub struct AllPipelines {
    pub shadow: ShadowPipeline,
    pub heart: HeartPipeline,
    pub glow: GlowPipeline,
    pub particles: ParticlePipeline,
}

/// Runs `f` inside validation and out-of-memory error scopes and turns a
/// captured error into a `Result`.
fn scoped<T>(device: &wgpu::Device, what: &str, f: impl FnOnce() -> T) -> Result<T> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    let validation = pollster::block_on(device.pop_error_scope());
    let oom = pollster::block_on(device.pop_error_scope());
    match validation.or(oom) {
        Some(err) => Err(anyhow!("{what}: {err}")),
        None => Ok(value),
    }
}

impl Renderer {
    pub async fn new(window: Arc<Window>, viewer: &ViewerConfig, scene: &SceneConfig) -> Result<Self> {
        let context = GpuContext::new(window).await?;
        let sample_count = viewer.sample_count.max(1);
        let targets = RenderTargets::new(&context, sample_count);
        let device = &context.device;
        let format = context.surface_format;

        let (layouts, pipelines, shadow_map, shadow_bg, frame) = scoped(device, "creating pipelines", || {
            let layouts = SceneLayouts::new(device);
            let pipelines = AllPipelines {
                shadow: ShadowPipeline::new(device, &layouts),
                heart: HeartPipeline::new(device, &layouts, format, sample_count, scene.heart_material.side),
                glow: GlowPipeline::new(device, &layouts, format, sample_count, scene.glow_material.side),
                particles: ParticlePipeline::new(device, &layouts, format, sample_count),
            };
            let shadow_map = ShadowMap::new(device, scene.lights.spot.shadow.map_size);
            let shadow_bg = shadow_map.bind_group(device, &layouts.shadow);
            let frame = UniformBinding::new(
                device,
                &layouts.frame,
                "Frame UBO",
                &FrameUniforms::new(&Camera::from_config(&scene.camera), (context.config.width, context.config.height), scene),
            );
            (layouts, pipelines, shadow_map, shadow_bg, frame)
        })?;

        let egui_renderer = egui_wgpu::Renderer::new(device, format, None, 1);

        log::info!(
            "renderer ready: {:?}, {}x MSAA, {}px shadow map",
            format,
            sample_count,
            shadow_map.size
        );

        Ok(Self {
            context,
            targets,
            pipelines,
            egui_renderer,
            layouts,
            shadow_map,
            shadow_bg,
            frame,
            clear_color: scene.background.to_wgpu(),
            cast_shadow: scene.lights.spot.cast_shadow,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.context.resize(new_size);
            self.targets = RenderTargets::new(&self.context, self.targets.sample_count);
        }
    }

    /// Uploads a scene. Any GPU-side failure is reported as an error instead
    /// of a device panic so the caller can fall back.
    pub fn build_scene(&self, scene: HeartScene) -> Result<SceneGpu> {
        let device = &self.context.device;
        let vertices = scene.geometry.mesh().flat_vertices();
        if vertices.is_empty() {
            return Err(anyhow!("heart mesh is empty"));
        }

        let rest = frame_transforms(&scene.config.animation, 0.0);
        let heart_model = scene.heart_model(&rest);
        let particle_model = scene.particle_model(&rest);

        let gpu = scoped(device, "uploading heart scene", || {
            let heart_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Heart VB"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            // wgpu rejects zero-sized vertex buffers; keep one dummy instance.
            let particle_data: &[f32] = if scene.particles.is_empty() {
                &[0.0; 3]
            } else {
                scene.particles.as_flat()
            };
            let particle_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Particle Instances"),
                contents: bytemuck::cast_slice(particle_data),
                usage: wgpu::BufferUsages::VERTEX,
            });

            let c = &scene.config;
            let heart = UniformBinding::new(
                device,
                &self.layouts.object,
                "Heart UBO",
                &ObjectUniforms::standard(heart_model, &c.heart_material),
            );
            let glow = UniformBinding::new(
                device,
                &self.layouts.object,
                "Glow UBO",
                &ObjectUniforms::glow(heart_model, &c.glow_material),
            );
            let particles = UniformBinding::new(
                device,
                &self.layouts.object,
                "Particles UBO",
                &ObjectUniforms::points(particle_model, &c.particle_material),
            );
            (heart_vb, particle_vb, heart, glow, particles)
        })?;

        let (heart_vb, particle_vb, heart, glow, particles) = gpu;
        let heart_vertex_count = vertices.len() as u32;
        let particle_count = scene.particles.len() as u32;
        log::debug!("uploaded {} heart vertices, {} particles", heart_vertex_count, particle_count);

        Ok(SceneGpu {
            scene,
            heart_vb,
            heart_vertex_count,
            particle_vb,
            particle_count,
            heart,
            glow,
            particles,
        })
    }

    /// Writes this frame's camera, light and object uniforms.
    pub fn prepare(&self, gpu: &SceneGpu, camera: &Camera, frame: &FrameTransforms) {
        let queue = &self.context.queue;
        let config = &gpu.scene.config;
        let viewport = (self.context.config.width, self.context.config.height);
        self.frame.write(queue, &FrameUniforms::new(camera, viewport, config));

        let heart_model = gpu.scene.heart_model(frame);
        let particle_model = gpu.scene.particle_model(frame);
        gpu.heart.write(queue, &ObjectUniforms::standard(heart_model, &config.heart_material));
        gpu.glow.write(queue, &ObjectUniforms::glow(heart_model, &config.glow_material));
        gpu.particles.write(queue, &ObjectUniforms::points(particle_model, &config.particle_material));
    }

    /// Records the shadow and scene passes. Without a scene only the
    /// background is cleared.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        swap_view: &wgpu::TextureView,
        scene: Option<&SceneGpu>,
    ) {
        // PASS 1: Heart depth from the spotlight
        if let Some(gpu) = scene.filter(|_| self.cast_shadow) {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rp.set_pipeline(&self.pipelines.shadow.pipeline);
            rp.set_bind_group(0, &self.frame.bind_group, &[]);
            rp.set_bind_group(1, &gpu.heart.bind_group, &[]);
            rp.set_vertex_buffer(0, gpu.heart_vb.slice(..));
            rp.draw(0..gpu.heart_vertex_count, 0..1);
        }

        // PASS 2: Scene (MSAA with resolve)
        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene"),
            color_attachments: &[Some(self.targets.color_attachment(swap_view, self.clear_color))],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let Some(gpu) = scene else {
            return;
        };

        rp.set_bind_group(0, &self.frame.bind_group, &[]);

        // Opaque heart first, then the translucent shell and additive sprites.
        rp.set_pipeline(&self.pipelines.heart.pipeline);
        rp.set_bind_group(1, &gpu.heart.bind_group, &[]);
        rp.set_bind_group(2, &self.shadow_bg, &[]);
        rp.set_vertex_buffer(0, gpu.heart_vb.slice(..));
        rp.draw(0..gpu.heart_vertex_count, 0..1);

        rp.set_pipeline(&self.pipelines.glow.pipeline);
        rp.set_bind_group(1, &gpu.glow.bind_group, &[]);
        rp.draw(0..gpu.heart_vertex_count, 0..1);

        if gpu.particle_count > 0 {
            rp.set_bind_group(1, &gpu.particles.bind_group, &[]);
            self.pipelines.particles.draw(&mut rp, &gpu.particle_vb, gpu.particle_count);
        }
    }
}
