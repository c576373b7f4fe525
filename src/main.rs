// src/main.rs
use anyhow::Result;
use heartview::{
    app::App,
    config::{SceneConfig, ViewerConfig},
};
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    env_logger::init();

    let viewer = ViewerConfig::default();
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(viewer.title.as_str())
            .with_inner_size(LogicalSize::new(viewer.width, viewer.height))
            .build(&event_loop)?,
    );

    let mut app = pollster::block_on(App::new(window.clone(), viewer, SceneConfig::default()));
    log::info!("heart scene {}", app.phase_name());

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(winit::event_loop::ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                // let egui consume events first
                if app.handle_event(&event) {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        app.unmount();
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. }
                        if event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
                    {
                        app.unmount();
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => app.resize(size),
                    WindowEvent::RedrawRequested => match app.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => app.resize(app.get_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("surface out of memory, exiting");
                            app.unmount();
                            elwt.exit();
                        }
                        Err(other) => log::warn!("dropped frame: {other:?}"),
                    },
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
