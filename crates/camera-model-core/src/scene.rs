//! The scene: an ordered set of objects, plus the JSON scene file format.

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::PinholeCamera;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{CameraModelError, Result};
use crate::object::{Line, Point, SceneObject, WireBox};

/// Identifier of an object within a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered collection of scene objects.
///
/// Objects are drawn in insertion order, so later objects paint over earlier ones.
#[derive(Default)]
pub struct Scene {
    objects: Vec<(ObjectId, Box<dyn SceneObject>)>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary object and returns its id.
    pub fn add_object(&mut self, object: Box<dyn SceneObject>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Adds a point.
    pub fn add_point(&mut self, position: Vec3, color: Color, thickness: u32) -> ObjectId {
        self.add_object(Box::new(
            Point::new(position)
                .with_color(color)
                .with_thickness(thickness),
        ))
    }

    /// Adds a line segment.
    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: u32) -> ObjectId {
        self.add_object(Box::new(
            Line::new(start, end)
                .with_color(color)
                .with_thickness(thickness),
        ))
    }

    /// Adds an axis-aligned wireframe box.
    pub fn add_box(&mut self, center: Vec3, size: Vec3, color: Color) -> ObjectId {
        self.add_object(Box::new(WireBox::new(center, size).with_color(color)))
    }

    /// Adds an origin marker: X in red, Y in green, Z in blue.
    pub fn add_axes(&mut self, length: f32) -> [ObjectId; 3] {
        [
            self.add_line(Vec3::ZERO, Vec3::X * length, Color::RED, 1),
            self.add_line(Vec3::ZERO, Vec3::Y * length, Color::GREEN, 1),
            self.add_line(Vec3::ZERO, Vec3::Z * length, Color::BLUE, 1),
        ]
    }

    /// Adds a square grid on the horizontal plane at height `y`, centered on the origin.
    ///
    /// The grid has `divisions + 1` lines running along Z and as many running along X.
    /// A `divisions` of 0 is treated as 1, which draws only the outline.
    pub fn add_grid(&mut self, y: f32, length: f32, divisions: u32, color: Color) -> Vec<ObjectId> {
        let divisions = divisions.max(1);
        let half = length / 2.0;
        let step = length / divisions as f32;

        let mut ids = Vec::with_capacity(2 * (divisions as usize + 1));
        for i in 0..=divisions {
            let x = -half + step * i as f32;
            ids.push(self.add_line(
                Vec3::new(x, y, -half),
                Vec3::new(x, y, half),
                color,
                1,
            ));
        }
        for i in 0..=divisions {
            let z = -half + step * i as f32;
            ids.push(self.add_line(
                Vec3::new(-half, y, z),
                Vec3::new(half, y, z),
                color,
                1,
            ));
        }
        ids
    }

    /// Removes an object.
    pub fn remove(&mut self, id: ObjectId) -> Result<Box<dyn SceneObject>> {
        let index = self
            .objects
            .iter()
            .position(|(oid, _)| *oid == id)
            .ok_or(CameraModelError::ObjectNotFound(id))?;
        Ok(self.objects.remove(index).1)
    }

    /// Shows or hides an object.
    pub fn set_enabled(&mut self, id: ObjectId, enabled: bool) -> Result<()> {
        let (_, object) = self
            .objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .ok_or(CameraModelError::ObjectNotFound(id))?;
        object.set_enabled(enabled);
        Ok(())
    }

    /// Gets an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&dyn SceneObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object.as_ref())
    }

    /// Returns the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes all objects. Ids are never reused.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Iterates over objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object.as_ref()))
    }

    /// Returns the bounding box of all objects, or `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        self.objects
            .iter()
            .map(|(_, object)| object.bounding_box())
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    /// Draws every enabled object onto `canvas`.
    pub fn render(&self, camera: &PinholeCamera, canvas: &mut Canvas) {
        for (_, object) in &self.objects {
            if object.is_enabled() {
                object.draw(camera, canvas);
            }
        }
    }

    /// Builds a scene from a description.
    pub fn from_description(description: &SceneDescription) -> Self {
        let mut scene = Self::new();
        if let Some(length) = description.axes {
            scene.add_axes(length);
        }
        if let Some(grid) = &description.grid {
            scene.add_grid(grid.y, grid.length, grid.divisions, grid.color);
        }
        for line in &description.lines {
            scene.add_line(line.start, line.end, line.color, line.thickness);
        }
        for wire_box in &description.boxes {
            scene.add_object(Box::new(
                WireBox::new(wire_box.center, wire_box.size)
                    .with_color(wire_box.color)
                    .with_thickness(wire_box.thickness),
            ));
        }
        for point in &description.points {
            scene.add_point(point.position, point.color, point.thickness);
        }
        scene
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

fn default_thickness() -> u32 {
    1
}

/// A point entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDescription {
    pub position: Vec3,
    #[serde(default)]
    pub color: Color,
    #[serde(default = "default_thickness")]
    pub thickness: u32,
}

/// A line entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDescription {
    pub start: Vec3,
    pub end: Vec3,
    #[serde(default)]
    pub color: Color,
    #[serde(default = "default_thickness")]
    pub thickness: u32,
}

/// A wireframe box entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDescription {
    pub center: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub color: Color,
    #[serde(default = "default_thickness")]
    pub thickness: u32,
}

/// A ground grid in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDescription {
    pub y: f32,
    pub length: f32,
    pub divisions: u32,
    pub color: Color,
}

impl Default for GridDescription {
    fn default() -> Self {
        Self {
            y: -1.0,
            length: 10.0,
            divisions: 10,
            color: Color::GRAY,
        }
    }
}

/// Initial camera pose in a scene file. Angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: Vec3,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub focus: Option<f32>,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            focus: None,
        }
    }
}

/// A scene file: objects to add and, optionally, where the camera starts.
///
/// ```json
/// {
///   "camera": { "position": [0, 0, -10] },
///   "axes": 1.0,
///   "grid": { "y": -1, "length": 10, "divisions": 10 },
///   "points": [{ "position": [0.1, -0.1, 1], "color": [0, 255, 0] }],
///   "lines": [{ "start": [0, 0, 0], "end": [1, 1, 1] }],
///   "boxes": [{ "center": [0, 0, 3], "size": [1, 1, 1], "color": [255, 160, 0] }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: Option<CameraDescription>,
    /// Length of the origin axis marker, if any.
    pub axes: Option<f32>,
    pub grid: Option<GridDescription>,
    pub points: Vec<PointDescription>,
    pub lines: Vec<LineDescription>,
    pub boxes: Vec<BoxDescription>,
}

impl SceneDescription {
    /// Parses a scene description from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a scene description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let description = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!(
            "loaded scene {} ({} points, {} lines, {} boxes)",
            path.display(),
            description.points.len(),
            description.lines.len(),
            description.boxes.len()
        );
        Ok(description)
    }

    /// Moves the camera to the pose stored in the description, if any.
    pub fn apply_camera(&self, camera: &mut PinholeCamera) -> Result<()> {
        if let Some(pose) = &self.camera {
            camera.move_to(pose.position);
            camera.rotate(pose.roll, pose.pitch, pose.yaw);
            if let Some(focus) = pose.focus {
                camera.set_focus(focus)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.bounding_box().is_none());

        let p = scene.add_point(Vec3::new(1.0, 2.0, 3.0), Color::GREEN, 1);
        let l = scene.add_line(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0), Color::WHITE, 2);
        assert_eq!(scene.len(), 2);
        assert_ne!(p, l);
        assert_eq!(scene.get(p).unwrap().type_name(), "Point");

        let removed = scene.remove(p).unwrap();
        assert_eq!(removed.type_name(), "Point");
        assert!(scene.get(p).is_none());
        assert!(matches!(
            scene.remove(p),
            Err(CameraModelError::ObjectNotFound(id)) if id == p
        ));

        scene.clear();
        let after_clear = scene.add_point(Vec3::ZERO, Color::WHITE, 1);
        assert!(after_clear > l, "ids are never reused");
    }

    #[test]
    fn test_bounding_box() {
        let mut scene = Scene::new();
        scene.add_point(Vec3::new(1.0, 2.0, 3.0), Color::WHITE, 1);
        scene.add_line(Vec3::new(-1.0, 0.0, 5.0), Vec3::ZERO, Color::WHITE, 1);
        assert_eq!(
            scene.bounding_box(),
            Some((Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 5.0)))
        );
    }

    #[test]
    fn test_axes_and_grid() {
        let mut scene = Scene::new();
        let axes = scene.add_axes(1.0);
        assert_eq!(axes.len(), 3);
        let grid = scene.add_grid(-1.0, 10.0, 10, Color::GRAY);
        assert_eq!(grid.len(), 22);
        assert_eq!(
            scene.bounding_box(),
            Some((Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 1.0, 5.0)))
        );

        let first = scene.get(grid[0]).unwrap();
        let line = first.as_any().downcast_ref::<Line>().unwrap();
        assert_eq!(line.start, Vec3::new(-5.0, -1.0, -5.0));
        assert_eq!(line.end, Vec3::new(-5.0, -1.0, 5.0));
        assert_eq!(line.color, Color::GRAY);
    }

    #[test]
    fn test_grid_without_divisions_is_an_outline() {
        let mut scene = Scene::new();
        let ids = scene.add_grid(0.0, 2.0, 0, Color::GRAY);
        assert_eq!(ids.len(), 4);
        let starts: Vec<Vec3> = ids
            .iter()
            .map(|id| {
                let object = scene.get(*id).unwrap();
                object.as_any().downcast_ref::<Line>().unwrap().start
            })
            .collect();
        assert_eq!(
            starts,
            vec![
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_disabled_objects_are_not_drawn() {
        let mut camera = PinholeCamera::new(100, 100);
        camera.move_to(Vec3::new(0.0, 0.0, -10.0));
        let mut scene = Scene::new();
        let id = scene.add_point(Vec3::ZERO, Color::WHITE, 2);

        let mut canvas = Canvas::new(100, 100, Color::BLACK);
        scene.render(&camera, &mut canvas);
        assert_eq!(canvas.pixel(50, 50), Some(Color::WHITE));

        scene.set_enabled(id, false).unwrap();
        let mut canvas = Canvas::new(100, 100, Color::BLACK);
        scene.render(&camera, &mut canvas);
        assert_eq!(canvas.pixel(50, 50), Some(Color::BLACK));
    }

    #[test]
    fn test_render_order_later_wins() {
        let mut camera = PinholeCamera::new(100, 100);
        camera.move_to(Vec3::new(0.0, 0.0, -10.0));
        let mut scene = Scene::new();
        scene.add_point(Vec3::ZERO, Color::RED, 1);
        scene.add_point(Vec3::ZERO, Color::BLUE, 1);

        let mut canvas = Canvas::new(100, 100, Color::BLACK);
        scene.render(&camera, &mut canvas);
        assert_eq!(canvas.pixel(50, 50), Some(Color::BLUE));
    }

    #[test]
    fn test_description_round_trip_into_scene() {
        let json = r#"{
            "camera": { "position": [0, 0, -10], "yaw": 0.5, "focus": 2.0 },
            "axes": 1.0,
            "grid": { "divisions": 4 },
            "points": [{ "position": [0.1, -0.1, 1], "color": [0, 255, 0] }],
            "lines": [{ "start": [0, 0, 0], "end": [1, 1, 1], "thickness": 3 }],
            "boxes": [{ "center": [0, 0, 3], "size": [1, 1, 1] }]
        }"#;
        let description = SceneDescription::from_json_str(json).unwrap();
        assert_eq!(description.points[0].thickness, 1);
        assert_eq!(description.lines[0].color, Color::WHITE);
        assert_eq!(description.grid.as_ref().unwrap().y, -1.0);

        let scene = Scene::from_description(&description);
        // 3 axes + 10 grid lines + 1 line + 1 box + 1 point
        assert_eq!(scene.len(), 16);

        let mut camera = PinholeCamera::new(800, 640);
        description.apply_camera(&mut camera).unwrap();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(camera.yaw(), 0.5);
        assert_eq!(camera.focus(), 2.0);
    }

    #[test]
    fn test_description_rejects_bad_focus() {
        let description =
            SceneDescription::from_json_str(r#"{ "camera": { "focus": -1 } }"#).unwrap();
        let mut camera = PinholeCamera::new(10, 10);
        assert!(matches!(
            description.apply_camera(&mut camera),
            Err(CameraModelError::InvalidFocus(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SceneDescription::load("/nonexistent/scene.json"),
            Err(CameraModelError::Io(_))
        ));
        assert!(matches!(
            SceneDescription::from_json_str("{ \"points\": 3 }"),
            Err(CameraModelError::Json(_))
        ));
    }
}
