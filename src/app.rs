use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window as WinitWindow, WindowId},
};

use crate::config::ViewerConfig;
use crate::context::{Variant, ViewerCommand, ViewerContext};
use crate::core::{Clock, WindowContext, WindowDimensions};
use crate::effects::CountdownEvent;
use crate::error::ViewerError;
use crate::frame::{FpsCounter, Frames};
use crate::render_loop::RenderLoop;
use crate::renderer::Renderer;
use crate::resolver::AssetResolver;
use crate::viewport;
use crate::window::Window;

const INITIAL_WINDOW_WIDTH: u32 = 1024;
const INITIAL_WINDOW_HEIGHT: u32 = 768;
const PIXELS_PER_WHEEL_STEP: f64 = 100.0;

/// winit application: owns the window, the GPU renderer and the viewer
pub struct App {
    variant: Variant,
    config: ViewerConfig,
    show_overlay: bool,
    window: Option<Window>,
    renderer: Option<Renderer>,
    viewer: Option<ViewerContext>,
    resolver: Option<AssetResolver>,
    render_loop: RenderLoop,
    frames: Frames,
    effects_clock: Clock,
    fps: FpsCounter,
    cursor: Option<PhysicalPosition<f64>>,
    fatal: Option<ViewerError>,
}

impl App {
    pub fn new(variant: Variant, config: ViewerConfig, show_overlay: bool) -> Self {
        Self {
            variant,
            render_loop: RenderLoop::new(&config),
            config,
            show_overlay,
            window: None,
            renderer: None,
            viewer: None,
            resolver: None,
            frames: Frames::new(),
            effects_clock: Clock::new(),
            fps: FpsCounter::default(),
            cursor: None,
            fatal: None,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn into_result(self) -> crate::error::Result<()> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("{}", err);
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> crate::error::Result<()> {
        let title = match self.variant {
            Variant::Showcase => "Model Showcase",
            Variant::Launch => "Model Launch",
        };
        let winit_window = event_loop
            .create_window(
                WinitWindow::default_attributes()
                    .with_title(title)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            )
            .map(Arc::new)
            .map_err(|e| ViewerError::Bootstrap(format!("Failed to create window: {}", e)))?;
        let window = Window::new(winit_window.clone());

        let mut renderer = pollster::block_on(Renderer::new(winit_window, self.show_overlay))?;
        let mut viewer = ViewerContext::bootstrap(self.variant, self.config.clone(), window.surface())?;
        viewport::sync(&mut viewer, &mut renderer, window.dimensions(), window.scale_factor());

        if self.variant.loads_asset() {
            self.resolver = Some(AssetResolver::spawn(
                &self.config.model_path,
                AssetResolver::log_progress,
            ));
        }

        self.effects_clock = Clock::new();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.viewer = Some(viewer);
        Ok(())
    }

    fn dispatch(&mut self, command: ViewerCommand) {
        if let (Some(viewer), Some(renderer)) = (self.viewer.as_mut(), self.renderer.as_mut()) {
            viewer.dispatch(command, renderer);
        }
    }

    fn redraw(&mut self) {
        let (Some(viewer), Some(renderer)) = (self.viewer.as_mut(), self.renderer.as_mut()) else {
            return;
        };
        let Some(frame) = self.frames.next() else {
            return;
        };

        viewer.advance_confetti(self.effects_clock.elapsed());
        if let Err(e) = self.render_loop.cycle(viewer, renderer, &frame) {
            log::warn!("Frame {} failed: {}", frame.number, e);
        }
        for command in renderer.take_commands() {
            viewer.dispatch(command, renderer);
        }

        if let Some(fps) = self.fps.record(frame.delta) {
            log::debug!("{:.0} FPS ({} cycles)", fps, self.render_loop.cycles());
        }
    }

    /// Apply the asset outcome and step the timers between redraws
    fn pump(&mut self) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        if let Some(resolution) = self.resolver.as_mut().and_then(AssetResolver::poll) {
            if let Err(e) = viewer.apply_resolution(resolution) {
                log::warn!("Ignoring asset result: {}", e);
            }
        }

        let delta = self.effects_clock.tick();
        let now = chrono::Local::now().naive_local();
        if let Some(CountdownEvent::Expired) = viewer.advance_effects(delta, now) {
            log::info!("Countdown finished");
        }
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        if let Some(last) = self.cursor.replace(position) {
            let dx = (position.x - last.x) as f32;
            let dy = (position.y - last.y) as f32;
            self.dispatch(ViewerCommand::Orbit { dx, dy });
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let Some(renderer) = self.renderer.as_mut() {
            if renderer.handle_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.dispatch(ViewerCommand::Shutdown),
            WindowEvent::Resized(size) => {
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.dispatch(ViewerCommand::Resize {
                    dimensions: WindowDimensions::new(size.width, size.height),
                    scale_factor,
                });
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(dimensions) = self.window.as_ref().map(|w| w.dimensions()) {
                    self.dispatch(ViewerCommand::Resize {
                        dimensions,
                        scale_factor,
                    });
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.dispatch(ViewerCommand::BeginDrag),
                ElementState::Released => self.dispatch(ViewerCommand::EndDrag),
            },
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(position),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_WHEEL_STEP) as f32,
                };
                self.dispatch(ViewerCommand::Zoom(steps));
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }

        if self.viewer.as_ref().is_some_and(|v| v.cancellation().is_cancelled()) {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump();

        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        if self.render_loop.should_reschedule(&viewer.cancellation()) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            event_loop.exit();
        }
    }
}
