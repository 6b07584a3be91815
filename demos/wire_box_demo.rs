//! A row of wireframe boxes receding from the camera.
//!
//! Pass an output path to render a single frame instead of opening a window:
//! cargo run --example wire_box_demo -- boxes.png

use camera_model::*;

fn main() -> Result<()> {
    env_logger::init();

    let options = Options {
        width: 960,
        height: 540,
        ..Options::default()
    };
    let mut viewer = Viewer::new("Wire boxes", options)?;

    let scene = viewer.scene_mut();
    scene.add_grid(-1.0, 20.0, 20, Color::GRAY);
    for i in 0..6u8 {
        let depth = f32::from(i) * 2.5;
        let color = Color::RED.lerp(Color::BLUE, f32::from(i) / 5.0);
        scene.add_box(Vec3::new(-2.0, -0.5, depth), Vec3::ONE, color);
        scene.add_box(Vec3::new(2.0, -0.5, depth), Vec3::ONE, color);
    }
    scene.add_line(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 1.5, 12.5),
        Color::WHITE,
        3,
    );

    let camera = viewer.camera_mut();
    camera.move_to(Vec3::new(0.0, 1.0, -8.0));
    camera.set_pitch(-10f32.to_radians());

    match std::env::args().nth(1) {
        Some(path) => viewer.render_to_file(path),
        None => viewer.show(),
    }
}
