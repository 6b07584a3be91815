//! Scene and options files, loaded the way the command-line viewer loads them.
//!
//! Tests that open a window are marked #[ignore] and should be run manually
//! with: cargo test -- --ignored

use std::fs;

use camera_model::*;

const SCENE: &str = r#"{
    "camera": { "position": [0, 0, -10], "focus": 1.0 },
    "axes": 1.0,
    "grid": { "y": -1, "length": 10, "divisions": 10, "color": [160, 160, 160] },
    "points": [
        { "position": [0.1, -0.1, 1], "color": [0, 255, 0] },
        { "position": [0, 0, 0], "color": [0, 255, 0], "thickness": 3 }
    ],
    "boxes": [
        { "center": [0, 0, 0], "size": [2, 2, 2], "color": [255, 160, 0] }
    ]
}"#;

#[test]
fn scene_file_drives_the_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("scene.json");
    let options_path = dir.path().join("options.json");
    fs::write(&scene_path, SCENE).unwrap();
    fs::write(
        &options_path,
        r#"{ "width": 320, "height": 240, "show_info": false }"#,
    )
    .unwrap();

    let options = Options::load(&options_path).unwrap();
    assert_eq!(options.fps, 30, "unspecified options keep their defaults");

    let mut viewer = Viewer::new("scene", options).unwrap();
    viewer
        .load_description(&SceneDescription::load(&scene_path).unwrap())
        .unwrap();
    // 3 axes, 22 grid lines, 1 box, 2 points
    assert_eq!(viewer.scene().len(), 28);
    assert_eq!(
        viewer.scene().bounding_box(),
        Some((Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 1.0, 5.0)))
    );

    let canvas = viewer.render_to_canvas();
    assert_eq!(canvas.pixel(160, 120), Some(Color::GREEN));
    // Thickness 3 draws a disk of radius 2.
    assert_eq!(canvas.pixel(162, 120), Some(Color::GREEN));
}

#[test]
fn scene_description_survives_json() {
    let description = SceneDescription::from_json_str(SCENE).unwrap();
    let json = serde_json::to_string(&description).unwrap();
    assert_eq!(SceneDescription::from_json_str(&json).unwrap(), description);
}

#[test]
fn invalid_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{ "focus": 5000 }"#).unwrap();
    assert!(matches!(
        Options::load(&path),
        Err(CameraModelError::InvalidOptions(_))
    ));

    fs::write(&path, "not json").unwrap();
    assert!(matches!(
        SceneDescription::load(&path),
        Err(CameraModelError::Json(_))
    ));
}

#[test]
#[ignore = "opens a window"]
fn show_demo_window() {
    let mut viewer = Viewer::new("Hello world!", Options::default()).unwrap();
    viewer
        .load_description(&SceneDescription::from_json_str(SCENE).unwrap())
        .unwrap();
    viewer.show().unwrap();
}
