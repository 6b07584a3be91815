//! camera-model: an interactive pinhole camera viewer for 3D points and lines.
//!
//! Objects are placed in world space, projected through a movable pinhole
//! camera and rasterized on the CPU. The window shows the result and lets you
//! fly the camera with the keyboard.
//!
//! # Quick Start
//!
//! ```no_run
//! use camera_model::*;
//!
//! fn main() -> Result<()> {
//!     let mut viewer = Viewer::new("Hello world!", Options::default())?;
//!
//!     viewer.scene_mut().add_axes(1.0);
//!     viewer.scene_mut().add_grid(-1.0, 10.0, 10, Color::GRAY);
//!     viewer.scene_mut().add_point(Vec3::new(0.1, -0.1, 1.0), Color::GREEN, 1);
//!     viewer.camera_mut().move_to(Vec3::new(0.0, 0.0, -10.0));
//!
//!     // Blocks until Esc is pressed or the window is closed
//!     viewer.show()
//! }
//! ```
//!
//! # Controls
//!
//! | key | effect |
//! |---|---|
//! | Esc | quit |
//! | ← / → | yaw |
//! | ↑ / ↓ | pitch |
//! | `,` / `.` | roll |
//! | `-` / `=` | focal length |
//! | q / e | move along Z |
//! | w / s | move along Y |
//! | a / d | move along X |
//! | i | toggle the info overlay |
//! | F12 | save `screenshot_NNNN.png` |

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
mod headless;
mod renderer;

use std::path::Path;

pub use camera_model_core::{
    error::{CameraModelError, Result},
    hud::CameraInfo,
    object::{Line, Point, SceneObject, WireBox},
    options::Options,
    scene::{ObjectId, Scene, SceneDescription},
    Axis, CameraCommand, Canvas, Color, FrameBuffers, Mat3, PinholeCamera, Vec2, Vec3,
};
pub use camera_model_render::{save_image, ScreenshotError};

pub use headless::{render_to_canvas, render_to_file};
pub use renderer::SceneRenderer;

/// A scene, a camera looking at it, and the window they are shown in.
pub struct Viewer {
    name: String,
    options: Options,
    scene: Scene,
    camera: PinholeCamera,
}

impl Viewer {
    /// Creates a viewer with an empty scene and a camera at the origin.
    ///
    /// Fails if `options` do not validate.
    pub fn new(name: impl Into<String>, options: Options) -> Result<Self> {
        options.validate()?;
        let camera = PinholeCamera::with_options(&options);
        Ok(Self {
            name: name.into(),
            options,
            scene: Scene::new(),
            camera,
        })
    }

    /// Replaces the scene with the one described and applies its camera pose.
    ///
    /// A focal length from the file is clamped to `[focus_min, focus_max]`.
    pub fn load_description(&mut self, description: &SceneDescription) -> Result<()> {
        description.apply_camera(&mut self.camera)?;
        let focus = self
            .camera
            .focus()
            .clamp(self.options.focus_min, self.options.focus_max);
        self.camera.set_focus(focus)?;
        self.scene = Scene::from_description(description);
        Ok(())
    }

    /// Replaces the scene with the demo: axes over a ground grid with two points,
    /// seen from ten meters back.
    pub fn load_demo_scene(&mut self) {
        self.scene = Scene::new();
        self.scene.add_axes(1.0);
        self.scene.add_grid(-1.0, 10.0, 10, Color::GRAY);
        self.scene.add_point(Vec3::new(0.1, -0.1, 1.0), Color::GREEN, 1);
        self.scene.add_point(Vec3::ZERO, Color::GREEN, 1);
        self.camera.move_to(Vec3::new(0.0, 0.0, -10.0));
    }

    /// Window title prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &PinholeCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PinholeCamera {
        &mut self.camera
    }

    /// Renders the current view without opening a window.
    pub fn render_to_canvas(&self) -> Canvas {
        headless::render_to_canvas(&self.scene, &self.camera, &self.options)
    }

    /// Renders the current view to a PNG or JPEG file.
    pub fn render_to_file(&self, filename: impl AsRef<Path>) -> Result<()> {
        headless::render_to_file(filename, &self.scene, &self.camera, &self.options)
    }

    /// Opens the window and runs until Esc is pressed or the window is closed.
    pub fn show(self) -> Result<()> {
        // Ignore the error if a logger is already installed
        let _ = env_logger::try_init();
        log::info!(
            "showing {:?} with {} objects at {}x{}",
            self.name,
            self.scene.len(),
            self.options.width,
            self.options.height
        );
        app::run_app(self.name, self.options, self.scene, self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_rejects_bad_options() {
        let options = Options {
            fps: 0,
            ..Options::default()
        };
        assert!(matches!(
            Viewer::new("bad", options),
            Err(CameraModelError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_viewer_load_description() {
        let description = SceneDescription::from_json_str(
            r#"{ "camera": { "position": [0, 0, -10] }, "axes": 1.0 }"#,
        )
        .unwrap();
        let mut viewer = Viewer::new("test", Options::default()).unwrap();
        viewer.scene_mut().add_point(Vec3::ZERO, Color::WHITE, 1);
        viewer.load_description(&description).unwrap();

        assert_eq!(viewer.scene().len(), 3);
        assert_eq!(viewer.camera().position(), Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(viewer.name(), "test");
    }

    #[test]
    fn test_scene_file_focus_is_clamped_to_limits() {
        let mut viewer = Viewer::new("focus", Options::default()).unwrap();
        let far = SceneDescription::from_json_str(r#"{ "camera": { "focus": 5000 } }"#).unwrap();
        viewer.load_description(&far).unwrap();
        assert_eq!(viewer.camera().focus(), viewer.options().focus_max);

        let near = SceneDescription::from_json_str(r#"{ "camera": { "focus": 0.01 } }"#).unwrap();
        viewer.load_description(&near).unwrap();
        assert_eq!(viewer.camera().focus(), viewer.options().focus_min);

        let inside = SceneDescription::from_json_str(r#"{ "camera": { "focus": 2.5 } }"#).unwrap();
        viewer.load_description(&inside).unwrap();
        assert_eq!(viewer.camera().focus(), 2.5);
    }

    #[test]
    fn test_demo_scene() {
        let mut viewer = Viewer::new("demo", Options::default()).unwrap();
        viewer.scene_mut().add_point(Vec3::ONE, Color::WHITE, 1);
        viewer.load_demo_scene();
        // 3 axes, 22 grid lines, 2 points
        assert_eq!(viewer.scene().len(), 27);
        assert_eq!(viewer.camera().position(), Vec3::new(0.0, 0.0, -10.0));
    }
}
