//! Scene objects: the things a camera can see.
//!
//! A [`SceneObject`] knows its world-space extent and how to draw itself onto a
//! [`Canvas`] as seen through a [`PinholeCamera`].

use std::any::Any;

use glam::Vec3;

use crate::camera::PinholeCamera;
use crate::canvas::Canvas;
use crate::color::Color;

/// A drawable object placed in world space.
pub trait SceneObject: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the type name of this object (e.g., "Point", "Line").
    fn type_name(&self) -> &'static str;

    /// Returns the axis-aligned bounding box in world coordinates.
    fn bounding_box(&self) -> (Vec3, Vec3);

    /// Returns whether this object is drawn.
    fn is_enabled(&self) -> bool;

    /// Sets whether this object is drawn.
    fn set_enabled(&mut self, enabled: bool);

    /// Draws this object onto the canvas as seen by `camera`.
    fn draw(&self, camera: &PinholeCamera, canvas: &mut Canvas);
}

/// A single point in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Vec3,
    pub color: Color,
    pub thickness: u32,
    enabled: bool,
}

impl Point {
    /// Creates a white point of thickness 1.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Color::WHITE,
            thickness: 1,
            enabled: true,
        }
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the thickness in pixels.
    #[must_use]
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }
}

impl SceneObject for Point {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Point"
    }

    fn bounding_box(&self) -> (Vec3, Vec3) {
        (self.position, self.position)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn draw(&self, camera: &PinholeCamera, canvas: &mut Canvas) {
        if let Some(pixel) = camera.world_to_pixel(self.position) {
            canvas.draw_point(pixel.round(), self.color, self.thickness);
        }
    }
}

/// A straight segment between two world-space points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub thickness: u32,
    enabled: bool,
}

impl Line {
    /// Creates a white line of thickness 1.
    #[must_use]
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            color: Color::WHITE,
            thickness: 1,
            enabled: true,
        }
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the thickness in pixels.
    #[must_use]
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }
}

impl SceneObject for Line {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Line"
    }

    fn bounding_box(&self) -> (Vec3, Vec3) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn draw(&self, camera: &PinholeCamera, canvas: &mut Canvas) {
        draw_segment(camera, canvas, self.start, self.end, self.color, self.thickness);
    }
}

/// An axis-aligned box drawn as its twelve edges.
#[derive(Debug, Clone, PartialEq)]
pub struct WireBox {
    pub center: Vec3,
    pub size: Vec3,
    pub color: Color,
    pub thickness: u32,
    enabled: bool,
}

impl WireBox {
    /// Creates a white box of thickness 1.
    #[must_use]
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            size: size.abs(),
            color: Color::WHITE,
            thickness: 1,
            enabled: true,
        }
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the thickness in pixels.
    #[must_use]
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Returns the eight corners; bit 0/1/2 of the index selects the max x/y/z side.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = self.bounding_box();
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        })
    }

    /// Returns the twelve edges as pairs of corner indices.
    #[must_use]
    pub fn edges() -> [(usize, usize); 12] {
        [
            (0, 1),
            (2, 3),
            (4, 5),
            (6, 7),
            (0, 2),
            (1, 3),
            (4, 6),
            (5, 7),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ]
    }
}

impl SceneObject for WireBox {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "WireBox"
    }

    fn bounding_box(&self) -> (Vec3, Vec3) {
        let half = self.size * 0.5;
        (self.center - half, self.center + half)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn draw(&self, camera: &PinholeCamera, canvas: &mut Canvas) {
        let corners = self.corners();
        for (a, b) in Self::edges() {
            draw_segment(camera, canvas, corners[a], corners[b], self.color, self.thickness);
        }
    }
}

fn draw_segment(
    camera: &PinholeCamera,
    canvas: &mut Canvas,
    start: Vec3,
    end: Vec3,
    color: Color,
    thickness: u32,
) {
    let start = camera.to_camera_frame(start);
    let end = camera.to_camera_frame(end);
    if let Some((a, b)) = camera.project_segment(start, end) {
        canvas.draw_line(a, b, color, thickness);
    }
}
