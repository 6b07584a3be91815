//! Axes over a ground grid with two points, seen from ten meters back.
//!
//! Run with: cargo run --example grid_demo

use camera_model::*;

fn main() -> Result<()> {
    let mut viewer = Viewer::new("Hello world!", Options::default())?;

    let scene = viewer.scene_mut();
    scene.add_axes(1.0);
    scene.add_grid(-1.0, 10.0, 10, Color::GRAY);
    scene.add_point(Vec3::new(0.1, -0.1, 1.0), Color::GREEN, 1);
    scene.add_point(Vec3::ZERO, Color::GREEN, 1);

    viewer.camera_mut().move_to(Vec3::new(0.0, 0.0, -10.0));
    viewer.show()
}
