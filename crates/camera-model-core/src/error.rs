//! Error types for camera-model.

use thiserror::Error;

use crate::scene::ObjectId;

/// The main error type for camera-model operations.
#[derive(Error, Debug)]
pub enum CameraModelError {
    /// Options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Focal length must be finite and positive.
    #[error("invalid focal length {0}: must be finite and positive")]
    InvalidFocus(f32),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// No object with the given id is in the scene.
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    /// Rendering or presentation error.
    #[error("render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for camera-model operations.
pub type Result<T> = std::result::Result<T, CameraModelError>;
