//! Windowed host for the engine: the render loop driver.
//!
//! The engine itself never touches the window; this module owns the event
//! loop, routes device events into the engine's input cell, advances the
//! clock, and asks the GPU state to draw. Teardown is RAII: when the app is
//! dropped the window, device, and input state go with it, so no listener
//! or frame callback can outlive the scene.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::engine::Engine;
use crate::error::RunError;
use crate::gpu::GpuState;
use crate::time::Clock;

/// Open a window and drive `engine` until the window closes.
pub(crate) fn run(engine: Engine) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(engine);
    event_loop.run_app(&mut app)?;

    // Setup failures inside the handler surface here.
    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    engine: Engine,
    clock: Clock,
    init_error: Option<RunError>,
}

impl App {
    fn new(engine: Engine) -> Self {
        Self {
            window: None,
            gpu: None,
            engine,
            clock: Clock::new(),
            init_error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("liqmesh")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.init_error = Some(RunError::Window(e));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.engine.input_mut().set_viewport(size.width, size.height);

        match pollster::block_on(GpuState::new(window.clone(), &self.engine)) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.window = Some(window);
            }
            Err(e) => {
                self.init_error = Some(RunError::Gpu(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.engine.input_mut().handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            // The host owns the pause decision: freeze the clock while the
            // window is not visible instead of animating a hidden scene.
            WindowEvent::Occluded(true) => self.clock.pause(),
            WindowEvent::Occluded(false) => self.clock.resume(),
            WindowEvent::RedrawRequested => {
                let (elapsed, delta) = self.clock.update();
                if !self.clock.is_paused() {
                    self.engine.frame(elapsed, delta);
                }

                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(&mut self.engine, elapsed) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            };
                            gpu.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
