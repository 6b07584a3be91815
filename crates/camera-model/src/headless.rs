//! Headless rendering API.
//!
//! Renders a scene to a canvas or image file without opening a window. The
//! rasterizer runs on the CPU, so no GPU is needed.

use std::path::Path;

use camera_model_core::{hud, Canvas, Options, PinholeCamera, Scene};

use crate::Result;

/// Renders one frame of `scene` as seen by `camera`.
///
/// The canvas uses `options.width`×`options.height` and `options.background`.
/// The info overlay is drawn when `options.show_info` is set.
pub fn render_to_canvas(scene: &Scene, camera: &PinholeCamera, options: &Options) -> Canvas {
    let mut canvas = Canvas::new(options.width, options.height, options.background);
    scene.render(camera, &mut canvas);
    if options.show_info {
        hud::draw_info(&mut canvas, &camera.info());
    }
    canvas
}

/// Renders one frame and saves it as PNG or JPEG, chosen by the file extension.
///
/// # Example
/// ```no_run
/// use camera_model::*;
///
/// let options = Options::default();
/// let mut scene = Scene::new();
/// scene.add_axes(1.0);
/// let mut camera = PinholeCamera::with_options(&options);
/// camera.move_to(Vec3::new(0.0, 0.0, -10.0));
/// render_to_file("axes.png", &scene, &camera, &options).unwrap();
/// ```
pub fn render_to_file(
    filename: impl AsRef<Path>,
    scene: &Scene,
    camera: &PinholeCamera,
    options: &Options,
) -> Result<()> {
    let canvas = render_to_canvas(scene, camera, options);
    camera_model_render::save_image(filename, &canvas)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use camera_model_core::{Color, Vec3};

    use super::*;

    #[test]
    fn test_overlay_follows_options() {
        let scene = Scene::new();
        let camera = PinholeCamera::new(200, 100);
        let mut options = Options {
            width: 200,
            height: 100,
            ..Options::default()
        };

        let with_info = render_to_canvas(&scene, &camera, &options);
        assert_ne!(with_info, Canvas::new(200, 100, Color::BLACK));

        options.show_info = false;
        let without_info = render_to_canvas(&scene, &camera, &options);
        assert_eq!(without_info, Canvas::new(200, 100, Color::BLACK));
    }

    #[test]
    fn test_background_color() {
        let options = Options {
            width: 10,
            height: 10,
            background: Color::WHITE,
            show_info: false,
            ..Options::default()
        };
        let mut scene = Scene::new();
        scene.add_point(Vec3::new(0.0, 0.0, 5.0), Color::RED, 1);
        let camera = PinholeCamera::with_options(&options);
        let canvas = render_to_canvas(&scene, &camera, &options);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(Color::RED));
    }
}
