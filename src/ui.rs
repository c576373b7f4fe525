// src/ui.rs
use crate::math::Rgb;
use crate::renderer::context::GpuContext;
use winit::window::Window;

/// Centered status line shown over the scene while it is not drawable.
pub struct Notice<'a> {
    pub text: &'a str,
    pub color: Rgb,
}

/// Runs one egui frame and composites it over `swap_view`. With no notice
/// the frame is empty but egui still consumes input and frees textures.
#[allow(clippy::too_many_arguments)]
pub fn draw_overlay(
    egui_ctx: &egui::Context,
    egui_state: &mut egui_winit::State,
    egui_renderer: &mut egui_wgpu::Renderer,
    window: &Window,
    gpu_context: &GpuContext,
    encoder: &mut wgpu::CommandEncoder,
    swap_view: &wgpu::TextureView,
    notice: Option<Notice<'_>>,
) {
    let egui_input = egui_state.take_egui_input(window);
    egui_ctx.begin_frame(egui_input);

    if let Some(notice) = notice {
        use egui::{Align2, Area, RichText};
        Area::new("status_notice".into())
            .interactable(false)
            .movable(false)
            .order(egui::Order::Foreground)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(egui_ctx, |ui| {
                ui.label(RichText::new(notice.text).color(notice.color.to_egui()).size(20.0));
            });
    }

    let egui_output = egui_ctx.end_frame();
    egui_state.handle_platform_output(window, egui_output.platform_output);
    let shapes = egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [gpu_context.config.width, gpu_context.config.height],
        pixels_per_point: egui_ctx.pixels_per_point(),
    };

    for (id, delta) in &egui_output.textures_delta.set {
        egui_renderer.update_texture(&gpu_context.device, &gpu_context.queue, *id, delta);
    }

    egui_renderer.update_buffers(
        &gpu_context.device,
        &gpu_context.queue,
        encoder,
        &shapes,
        &screen_descriptor,
    );

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: swap_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        egui_renderer.render(&mut render_pass, &shapes, &screen_descriptor);
    }

    for id in &egui_output.textures_delta.free {
        egui_renderer.free_texture(id);
    }
}
