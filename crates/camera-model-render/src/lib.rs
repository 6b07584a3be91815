//! Presentation backend for camera-model.
//!
//! This crate provides:
//! - A wgpu [`Presenter`] that blits software-rendered canvases to a window
//! - Image export for screenshots and headless renders

pub mod error;
pub mod presenter;
pub mod screenshot;

pub use error::{RenderError, RenderResult};
pub use presenter::Presenter;
pub use screenshot::{next_screenshot_path, save_image, save_to_buffer, ScreenshotError};
