//! Background thread that rasterizes the scene into the frame buffers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::RwLock;

use camera_model_core::{Canvas, FrameBuffers, FrameClock, Options, PinholeCamera, Scene};

use crate::Result;

/// Handle to the render thread. Dropping it stops and joins the thread.
pub struct SceneRenderer {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SceneRenderer {
    /// Starts rendering `scene` through `camera` into `frames` at up to `options.fps`.
    pub fn spawn(
        scene: Arc<RwLock<Scene>>,
        camera: Arc<RwLock<PinholeCamera>>,
        frames: Arc<FrameBuffers>,
        options: &Options,
    ) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let mut canvas = Canvas::new(options.width, options.height, options.background);
        let mut clock = FrameClock::new(options.fps);
        let background = options.background;

        let handle = thread::Builder::new()
            .name("scene-renderer".to_string())
            .spawn({
                let running = Arc::clone(&running);
                move || {
                    log::info!("renderer started");
                    while running.load(Ordering::Acquire) {
                        clock.begin();
                        let camera = camera.read().clone();
                        canvas.clear(background);
                        scene.read().render(&camera, &mut canvas);
                        canvas = frames.publish(canvas);

                        let idle = clock.finish();
                        log::debug!("frame {} idle {idle:?}", frames.generation());
                        thread::sleep(idle);
                    }
                    log::info!("renderer stopped after {} frames", frames.generation());
                }
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Returns true while the render thread is running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("renderer thread panicked");
            }
        }
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        self.stop();
    }
}
