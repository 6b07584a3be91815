//! Rendering error types.

use thiserror::Error;

/// Errors that can occur while presenting frames.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable format.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for camera_model_core::CameraModelError {
    fn from(err: RenderError) -> Self {
        camera_model_core::CameraModelError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use camera_model_core::CameraModelError;

    use super::*;

    #[test]
    fn test_render_errors_map_into_viewer_errors() {
        let err: CameraModelError = RenderError::OutOfMemory.into();
        assert!(matches!(&err, CameraModelError::Render(msg) if msg == "out of memory"));
        assert_eq!(err.to_string(), "render error: out of memory");

        let err: CameraModelError = RenderError::SurfaceConfigurationFailed.into();
        assert!(matches!(err, CameraModelError::Render(_)));
    }
}
