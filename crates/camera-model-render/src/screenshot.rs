//! Saving canvases as image files.

use std::path::Path;

use camera_model_core::Canvas;
use image::{ImageBuffer, Rgba};

/// Saves a canvas to an image file.
///
/// The format follows the extension: `.png`, `.jpg` or `.jpeg`.
pub fn save_image(filename: impl AsRef<Path>, canvas: &Canvas) -> Result<(), ScreenshotError> {
    let path = filename.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img = to_image(canvas)?;
    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // JPEG has no alpha channel
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(ScreenshotError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved {}", path.display());
    Ok(())
}

/// Encodes a canvas as PNG in memory.
pub fn save_to_buffer(canvas: &Canvas) -> Result<Vec<u8>, ScreenshotError> {
    let img = to_image(canvas)?;
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Returns the first `screenshot_NNNN.png` in `dir` that does not exist yet.
pub fn next_screenshot_path(dir: impl AsRef<Path>) -> std::path::PathBuf {
    let dir = dir.as_ref();
    (0u32..)
        .map(|i| dir.join(format!("screenshot_{i:04}.png")))
        .find(|path| !path.exists())
        .unwrap_or_else(|| dir.join("screenshot.png"))
}

fn to_image(canvas: &Canvas) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>, ScreenshotError> {
    ImageBuffer::from_raw(canvas.width(), canvas.height(), canvas.pixels().to_vec())
        .ok_or(ScreenshotError::InvalidImageData)
}

/// Error type for screenshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Failed to save image: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image data")]
    InvalidImageData,
}

impl From<ScreenshotError> for camera_model_core::CameraModelError {
    fn from(err: ScreenshotError) -> Self {
        match err {
            ScreenshotError::IoError(io) => camera_model_core::CameraModelError::Io(io),
            other => camera_model_core::CameraModelError::Render(other.to_string()),
        }
    }
}
