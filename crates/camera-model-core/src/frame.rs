//! Frame hand-off between the render thread and the display thread.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::canvas::Canvas;
use crate::color::Color;

/// Double buffer for finished frames.
///
/// The renderer draws into a canvas it owns and [`publish`](Self::publish)es it; the
/// display side reads the newest frame with [`with_latest`](Self::with_latest).
/// A reader never observes a partially drawn frame.
#[derive(Debug)]
pub struct FrameBuffers {
    front: Mutex<Front>,
}

#[derive(Debug)]
struct Front {
    canvas: Canvas,
    generation: u64,
}

impl FrameBuffers {
    /// Creates buffers holding a blank frame of the given size.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            front: Mutex::new(Front {
                canvas: Canvas::new(width, height, background),
                generation: 0,
            }),
        }
    }

    /// Makes `canvas` the newest frame and returns the previous one for reuse.
    pub fn publish(&self, mut canvas: Canvas) -> Canvas {
        let mut front = self.front.lock();
        std::mem::swap(&mut front.canvas, &mut canvas);
        front.generation += 1;
        canvas
    }

    /// Calls `f` with the newest frame and its generation.
    pub fn with_latest<R>(&self, f: impl FnOnce(&Canvas, u64) -> R) -> R {
        let front = self.front.lock();
        f(&front.canvas, front.generation)
    }

    /// Number of frames published so far.
    pub fn generation(&self) -> u64 {
        self.front.lock().generation
    }
}

const FPS_WINDOW: usize = 30;

/// Paces a loop to a target frame rate and measures the rate actually achieved.
#[derive(Debug)]
pub struct FrameClock {
    frame_time: Duration,
    started: Option<Instant>,
    recent: VecDeque<Instant>,
}

impl FrameClock {
    /// Creates a clock targeting `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / fps.max(1),
            started: None,
            recent: VecDeque::with_capacity(FPS_WINDOW + 1),
        }
    }

    /// Target duration of one frame.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Marks the start of a frame.
    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Ends the frame, returning how long to sleep to hold the target rate.
    pub fn finish(&mut self) -> Duration {
        self.record_frame();
        self.started
            .take()
            .map_or(Duration::ZERO, |start| {
                self.frame_time.saturating_sub(start.elapsed())
            })
    }

    /// Records a presented frame for the fps measurement.
    pub fn record_frame(&mut self) {
        self.recent.push_back(Instant::now());
        while self.recent.len() > FPS_WINDOW {
            self.recent.pop_front();
        }
    }

    /// Frames per second over the recent window, or 0 before two frames are recorded.
    pub fn fps(&self) -> f32 {
        match (self.recent.front(), self.recent.back()) {
            (Some(first), Some(last)) if self.recent.len() > 1 => {
                let span = last.duration_since(*first).as_secs_f32();
                if span > 0.0 {
                    (self.recent.len() - 1) as f32 / span
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}
