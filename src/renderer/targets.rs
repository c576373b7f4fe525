// src/renderer/targets.rs
//! Render target textures: the multisampled scene framebuffer and the
//! spotlight's shadow map.

use super::context::GpuContext;
use super::pipelines::base::DEPTH_FORMAT;

pub struct RenderTargets {
    pub sample_count: u32,
    /// Multisampled color, resolved into the swapchain. `None` when MSAA is off.
    pub color: Option<(wgpu::Texture, wgpu::TextureView)>,
    pub depth: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub fn new(gpu: &GpuContext, sample_count: u32) -> Self {
        let size = wgpu::Extent3d {
            width: gpu.config.width,
            height: gpu.config.height,
            depth_or_array_layers: 1,
        };

        let make_tex = |label, fmt| {
            let tex = gpu.device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: fmt,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
            (tex, view)
        };

        let color = (sample_count > 1).then(|| make_tex("SceneColor MS", gpu.surface_format));
        let (depth, depth_view) = make_tex("Depth MS", DEPTH_FORMAT);

        Self { sample_count, color, depth, depth_view }
    }

    /// Color attachment for the scene pass writing to `swap_view`.
    pub fn color_attachment<'a>(
        &'a self,
        swap_view: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let ops = wgpu::Operations { load: wgpu::LoadOp::Clear(clear), store: wgpu::StoreOp::Store };
        match &self.color {
            Some((_, view)) => wgpu::RenderPassColorAttachment {
                view,
                resolve_target: Some(swap_view),
                ops,
            },
            None => wgpu::RenderPassColorAttachment { view: swap_view, resolve_target: None, ops },
        }
    }
}

/// Square depth texture rendered from the spotlight.
pub struct ShadowMap {
    pub size: u32,
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl ShadowMap {
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let size = size.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Spot Shadow Map"),
            size: wgpu::Extent3d { width: size, height: size, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Compare"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        Self { size, texture, view, sampler }
    }

    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Map BG"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}
