// src/app.rs
use crate::{
    camera::{Camera, OrbitController},
    config::{SceneConfig, ViewerConfig},
    math::Rgb,
    mount::{Mount, Phase},
    renderer::{Renderer, SceneGpu},
    scene::HeartScene,
    ui::{self, Notice},
};
use std::{sync::Arc, time::Instant};
use winit::{event::WindowEvent, window::Window};

/// The host window and the mounted heart scene.
pub struct App {
    pub window: Arc<Window>,
    renderer: Option<Renderer>,

    // UI
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,

    // Scene
    config: SceneConfig,
    viewer: ViewerConfig,
    mount: Mount<SceneGpu>,

    // Camera & Controls
    camera: Camera,
    orbit: OrbitController,

    /// Set once a placeholder frame has been presented.
    placeholder_shown: bool,
}

impl App {
    /// Never fails: without a GPU the app stays up and reports the scene as
    /// unavailable. Nothing can be drawn into the window then, so the window
    /// title carries the fallback text instead of the overlay.
    pub async fn new(window: Arc<Window>, viewer: ViewerConfig, config: SceneConfig) -> Self {
        let mut mount = Mount::new(config.animation.clone());
        let renderer = match Renderer::new(window.clone(), &viewer, &config).await {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                mount.fail(format!("{:#}", e));
                window.set_title(&format!("{} - {}", viewer.title, viewer.fallback_text));
                None
            }
        };

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        let camera = Camera::from_config(&config.camera);
        let orbit = OrbitController::new(config.orbit.clone(), &camera);

        Self {
            window,
            renderer,
            egui_ctx,
            egui_state,
            config,
            viewer,
            mount,
            camera,
            orbit,
            placeholder_shown: false,
        }
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> {
        match &self.renderer {
            Some(renderer) => renderer.context.size,
            None => self.window.inner_size(),
        }
    }

    pub fn phase_name(&self) -> &'static str {
        self.mount.phase().name()
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(new_size);
        }
    }

    /// Feeds a window event to egui and then the orbit controls. Returns
    /// true when egui consumed it.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(&self.window, event);
        if response.consumed {
            return true;
        }

        if self.mount.is_ready() {
            let height = self.get_size().height as f32;
            self.orbit.handle_event(event, height);
        }
        false
    }

    /// Releases the scene's GPU resources. Rendering continues with the
    /// background only.
    pub fn unmount(&mut self) {
        self.mount.unmount();
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(renderer) = &self.renderer else {
            return Ok(());
        };

        // The placeholder gets one presented frame before the scene is built.
        if self.placeholder_shown && self.mount.is_loading() {
            let config = &self.config;
            self.mount.resolve(|| renderer.build_scene(HeartScene::new(config)));
        }

        if let Some((gpu, frame)) = self.mount.frame(Instant::now()) {
            self.orbit.apply(&mut self.camera, frame.elapsed);
            renderer.prepare(gpu, &self.camera, &frame);
        }

        let frame = renderer.context.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = renderer.context.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            },
        );

        renderer.render(&mut encoder, &swap_view, self.mount.scene());

        let notice = notice_for(self.mount.phase(), &self.viewer, &self.config);
        let Some(renderer) = &mut self.renderer else {
            return Ok(());
        };
        ui::draw_overlay(
            &self.egui_ctx,
            &mut self.egui_state,
            &mut renderer.egui_renderer,
            &self.window,
            &renderer.context,
            &mut encoder,
            &swap_view,
            notice,
        );

        renderer.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        self.placeholder_shown = true;

        Ok(())
    }
}

/// Muted label color for the static fallback.
const FALLBACK_COLOR: Rgb = Rgb(0x6b6f8a);

fn notice_for<'a, S>(
    phase: &Phase<S>,
    viewer: &'a ViewerConfig,
    config: &SceneConfig,
) -> Option<Notice<'a>> {
    match phase {
        Phase::Loading => Some(Notice { text: &viewer.loading_text, color: config.heart_material.color }),
        Phase::Unavailable(_) => Some(Notice { text: &viewer.fallback_text, color: FALLBACK_COLOR }),
        Phase::Ready(_) | Phase::Unmounted => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_per_phase() {
        let viewer = ViewerConfig::default();
        let config = SceneConfig::default();

        let loading = notice_for(&Phase::<()>::Loading, &viewer, &config);
        assert_eq!(loading.map(|n| n.text), Some("Loading 3D Heart..."));

        let failed = notice_for(&Phase::<()>::Unavailable("no adapter".into()), &viewer, &config);
        assert_eq!(failed.as_ref().map(|n| n.text), Some("3D view unavailable"));
        assert_eq!(failed.map(|n| n.color), Some(FALLBACK_COLOR));

        assert!(notice_for(&Phase::Ready(()), &viewer, &config).is_none());
        assert!(notice_for(&Phase::<()>::Unmounted, &viewer, &config).is_none());
    }
}
