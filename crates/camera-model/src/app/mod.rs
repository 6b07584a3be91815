//! Application window and event loop management.

mod input;

pub(super) use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use camera_model_core::{hud, Canvas, FrameBuffers, FrameClock, Options, PinholeCamera, Scene};
pub(super) use camera_model_render::Presenter;

use crate::renderer::SceneRenderer;
use crate::{CameraModelError, Result};

const TITLE_REFRESH: Duration = Duration::from_millis(500);

/// The viewer application state.
pub struct App {
    name: String,
    options: Options,
    camera: Arc<RwLock<PinholeCamera>>,
    frames: Arc<FrameBuffers>,
    renderer: Option<SceneRenderer>,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    // Latest frame plus the overlay, as last presented
    display: Canvas,
    clock: FrameClock,
    show_info: bool,
    next_redraw: Instant,
    last_title_update: Instant,
    close_requested: bool,
    error: Option<CameraModelError>,
}

impl App {
    /// Creates the application and starts the render thread.
    pub fn new(name: String, options: Options, scene: Scene, camera: PinholeCamera) -> Result<Self> {
        let scene = Arc::new(RwLock::new(scene));
        let camera = Arc::new(RwLock::new(camera));
        let frames = Arc::new(FrameBuffers::new(
            options.width,
            options.height,
            options.background,
        ));
        let renderer = SceneRenderer::spawn(scene, Arc::clone(&camera), Arc::clone(&frames), &options)?;

        let now = Instant::now();
        Ok(Self {
            name,
            display: Canvas::new(options.width, options.height, options.background),
            clock: FrameClock::new(options.fps),
            show_info: options.show_info,
            options,
            camera,
            frames,
            renderer: Some(renderer),
            window: None,
            presenter: None,
            next_redraw: now,
            last_title_update: now,
            close_requested: false,
            error: None,
        })
    }

    fn fail(&mut self, error: CameraModelError) {
        log::error!("{error}");
        self.error = Some(error);
        self.close_requested = true;
    }

    /// Copies the newest frame, adds the overlay and puts it on screen.
    fn redraw(&mut self) {
        let display = &mut self.display;
        self.frames.with_latest(|frame, _| display.copy_from(frame));
        if self.show_info {
            let info = self.camera.read().info();
            hud::draw_info(&mut self.display, &info);
        }

        let Some(presenter) = &mut self.presenter else {
            return;
        };
        if let Err(e) = presenter.present(&self.display) {
            self.fail(e.into());
            return;
        }
        self.clock.record_frame();

        if self.last_title_update.elapsed() >= TITLE_REFRESH {
            self.last_title_update = Instant::now();
            if let Some(window) = &self.window {
                window.set_title(&self.title());
            }
        }
    }

    fn title(&self) -> String {
        hud::window_title(
            &self.name,
            self.options.width,
            self.options.height,
            self.clock.fps(),
            self.options.show_fps,
        )
    }

    /// Saves the frame currently on screen.
    fn save_screenshot(&self) {
        let path = camera_model_render::next_screenshot_path(".");
        if let Err(e) = camera_model_render::save_image(&path, &self.display) {
            log::warn!("screenshot {} failed: {e}", path.display());
        }
    }

    fn shutdown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.stop();
        }
        self.presenter = None;
        self.window = None;
    }
}

/// Runs the viewer until it is closed.
pub fn run_app(name: String, options: Options, scene: Scene, camera: PinholeCamera) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|e| CameraModelError::Render(format!("event loop: {e}")))?;
    let mut app = App::new(name, options, scene, camera)?;

    let outcome = event_loop
        .run_app(&mut app)
        .map_err(|e| CameraModelError::Render(format!("event loop: {e}")));
    app.shutdown();
    log::info!("viewer closed");

    outcome?;
    app.error.take().map_or(Ok(()), Err)
}
