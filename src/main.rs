use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tracing::{error, info, warn};
use winit::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::*,
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window},
};

// Import from the library crate
use blockworld::{
    controller::{Game, InputEvent, KeyBindings, MouseButton},
    logging,
    ui::DebugOverlay,
    view::{GpuContext, PixelBuffer, Renderer},
    AppConfig, AppError,
};

struct App {
    window: Arc<Window>,
    renderer: Renderer,
    overlay: DebugOverlay,
    game: Game,
    bindings: KeyBindings,
    last_frame_time: Instant,
}

impl App {
    async fn new(window: Arc<Window>, config: &AppConfig, pixels: &PixelBuffer) -> blockworld::Result<Self> {
        let gpu = GpuContext::new(window.clone()).await?;
        let renderer = Renderer::new(gpu, pixels);
        let overlay = DebugOverlay::new(&window);

        let mut game = Game::new(config);
        let (width, height) = renderer.size();
        game.camera.set_aspect(width, height);

        let mut app = Self {
            window,
            renderer,
            overlay,
            game,
            bindings: KeyBindings::default(),
            last_frame_time: Instant::now(),
        };
        app.capture_pointer();
        Ok(app)
    }

    /// Hide and grab the cursor for mouse-look.
    ///
    /// Raw motion deltas arrive without an OS grab, so a failed grab still
    /// enters look mode.
    fn capture_pointer(&mut self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            warn!(error = %e, "cursor grab unavailable");
        }
        self.window.set_cursor_visible(false);
        self.game.push_event(InputEvent::PointerCaptured(true));
    }

    fn release_pointer(&mut self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.game.push_event(InputEvent::PointerCaptured(false));
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: KeyEvent { state, physical_key, repeat: false, .. }, .. } => {
                if let PhysicalKey::Code(code) = physical_key {
                    if let Some(ev) = self.bindings.key_event(*code, *state == ElementState::Pressed) {
                        self.game.push_event(ev);
                    }
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                if pressed && !self.game.pointer_captured() {
                    // The click that regains the pointer does not edit
                    self.capture_pointer();
                } else if let Some(button) = MouseButton::from_winit(*button) {
                    self.game.on_mouse_button(button, pressed);
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.game.push_event(InputEvent::FocusLost);
                self.release_pointer();
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size.width, new_size.height);
            self.game.camera.set_aspect(new_size.width, new_size.height);
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.overlay.stats.tick(dt);
        self.game.update_frame();
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let target = self.game.target();
        self.renderer.prepare(&self.game.camera, &self.game.grid, target);
        let ui = self.overlay.run(&self.window, &self.game);
        self.renderer.draw_frame(Some(ui))
    }
}

/// Top-left position that centres a window on a monitor.
fn centered_position(monitor: PhysicalSize<u32>, window: PhysicalSize<u32>) -> PhysicalPosition<i32> {
    PhysicalPosition::new(
        (monitor.width as i32 - window.width as i32) / 2,
        (monitor.height as i32 - window.height as i32) / 2,
    )
}

fn create_window(event_loop: &EventLoop<()>, config: &AppConfig) -> blockworld::Result<Arc<Window>> {
    let window_attributes = Window::default_attributes()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.width, config.height));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    if let Some(monitor) = window.primary_monitor().or_else(|| window.current_monitor()) {
        window.set_outer_position(centered_position(monitor.size(), window.outer_size()));
    }
    Ok(window)
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = AppConfig::from_env();
    info!(?config, "starting");

    let pixels = PixelBuffer::load(&config.texture_path).context("loading block texture")?;

    let event_loop = EventLoop::new().map_err(AppError::from)?;
    let window = create_window(&event_loop, &config)?;

    let mut app = pollster::block_on(App::new(window, &config, &pixels)).context("initialising renderer")?;
    drop(pixels);

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => app.game.push_event(InputEvent::ExitRequested),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            app.update();
                            if app.game.exit_requested() {
                                info!("exit requested");
                                elwt.exit();
                                return;
                            }

                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    app.renderer.gpu.reconfigure()
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    error!("surface out of memory");
                                    elwt.exit();
                                }
                                Err(e) => warn!(error = ?e, "dropped frame"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent { event: DeviceEvent::MouseMotion { delta }, .. } => {
                app.game.on_pointer_delta(delta.0 as f32, delta.1 as f32);
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })
    .map_err(AppError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_position() {
        let pos = centered_position(PhysicalSize::new(1920, 1080), PhysicalSize::new(800, 600));
        assert_eq!(pos, PhysicalPosition::new(560, 240));

        // Windows larger than the monitor end up with a negative origin
        let pos = centered_position(PhysicalSize::new(640, 480), PhysicalSize::new(800, 600));
        assert_eq!(pos, PhysicalPosition::new(-80, -60));
    }
}
