//! Pinhole camera with a 6-DOF pose.
//!
//! World points are moved into the camera frame with `R · (p − position)`, where
//! `R = Rz(roll) · Ry(yaw) · Rx(pitch)`. The camera looks down its +Z axis; camera-frame
//! +X lands on the left half of the image and +Y on the upper half.

use glam::{Mat3, Vec2, Vec3};

use crate::error::{CameraModelError, Result};
use crate::hud::CameraInfo;
use crate::options::Options;

/// A pinhole camera projecting onto a fixed-size canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    position: Vec3,
    roll: f32,
    pitch: f32,
    yaw: f32,
    rotation: Mat3,
    /// Focal length in meters.
    focus: f32,
    /// Sensor scale factor in pixels per meter.
    pixels_per_meter: f32,
    width: u32,
    height: u32,
    near_clip: f32,
}

impl PinholeCamera {
    /// Creates a camera at the origin with unit focus and 800 px/m scale.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::ZERO,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            rotation: Mat3::IDENTITY,
            focus: 1.0,
            pixels_per_meter: 800.0,
            width,
            height,
            near_clip: 0.01,
        }
    }

    /// Creates a camera using the canvas size, focus, scale and near clip from `options`.
    #[must_use]
    pub fn with_options(options: &Options) -> Self {
        Self {
            focus: options.focus,
            pixels_per_meter: options.pixels_per_meter,
            near_clip: options.near_clip,
            ..Self::new(options.width, options.height)
        }
    }

    /// Moves the camera to a new world position.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Moves the camera by `delta` in world coordinates.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Returns the camera position in world coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Sets all three Euler angles (radians) and rebuilds the rotation.
    pub fn rotate(&mut self, roll: f32, pitch: f32, yaw: f32) {
        self.roll = roll;
        self.pitch = pitch;
        self.yaw = yaw;
        self.rotation =
            Mat3::from_rotation_z(roll) * Mat3::from_rotation_y(yaw) * Mat3::from_rotation_x(pitch);
    }

    /// Rotation about the optical (Z) axis, in radians.
    #[must_use]
    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn set_roll(&mut self, roll: f32) {
        self.rotate(roll, self.pitch, self.yaw);
    }

    /// Rotation about the camera X axis, in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.rotate(self.roll, pitch, self.yaw);
    }

    /// Rotation about the camera Y axis, in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotate(self.roll, self.pitch, yaw);
    }

    /// Returns the world-to-camera rotation matrix.
    #[must_use]
    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// Returns the focal length in meters.
    #[must_use]
    pub fn focus(&self) -> f32 {
        self.focus
    }

    /// Sets the focal length in meters.
    pub fn set_focus(&mut self, focus: f32) -> Result<()> {
        if !(focus.is_finite() && focus > 0.0) {
            return Err(CameraModelError::InvalidFocus(focus));
        }
        self.focus = focus;
        Ok(())
    }

    /// Returns the sensor scale factor in pixels per meter.
    #[must_use]
    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    /// Returns the canvas size this camera projects onto.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the near clip depth.
    #[must_use]
    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    /// Returns the intrinsic matrix `K`.
    ///
    /// `K = [[f·s, 0, W/2], [0, f·s, H/2], [0, 0, 1]]`, outputting homogeneous `[u, v, 1]`.
    #[must_use]
    pub fn intrinsics(&self) -> Mat3 {
        let fs = self.focus * self.pixels_per_meter;
        Mat3::from_cols(
            Vec3::new(fs, 0.0, 0.0),
            Vec3::new(0.0, fs, 0.0),
            Vec3::new(self.width as f32 / 2.0, self.height as f32 / 2.0, 1.0),
        )
    }

    /// Transforms a world-frame point into the camera frame.
    #[must_use]
    pub fn to_camera_frame(&self, world: Vec3) -> Vec3 {
        self.rotation * (world - self.position)
    }

    /// Projects a camera-frame point onto the canvas.
    ///
    /// Returns `None` for points closer than the near clip depth, including anything
    /// behind the camera.
    #[must_use]
    pub fn project(&self, camera: Vec3) -> Option<Vec2> {
        (camera.z >= self.near_clip).then(|| self.project_unclipped(camera))
    }

    /// Projects a camera-frame segment, clipping it against the near plane first.
    #[must_use]
    pub fn project_segment(&self, start: Vec3, end: Vec3) -> Option<(Vec2, Vec2)> {
        let near = self.near_clip;
        if start.z < near && end.z < near {
            return None;
        }

        let clip = |behind: Vec3, front: Vec3| {
            let t = (near - behind.z) / (front.z - behind.z);
            let mut p = behind + (front - behind) * t;
            p.z = near;
            p
        };
        let (start, end) = if start.z < near {
            (clip(start, end), end)
        } else if end.z < near {
            (start, clip(end, start))
        } else {
            (start, end)
        };

        Some((self.project_unclipped(start), self.project_unclipped(end)))
    }

    /// Projects a world-frame point onto the canvas.
    #[must_use]
    pub fn world_to_pixel(&self, world: Vec3) -> Option<Vec2> {
        self.project(self.to_camera_frame(world))
    }

    /// Returns a snapshot of the pose and focus for the info overlay.
    #[must_use]
    pub fn info(&self) -> CameraInfo {
        CameraInfo {
            position: self.position,
            roll: self.roll,
            pitch: self.pitch,
            yaw: self.yaw,
            focus: self.focus,
        }
    }

    fn project_unclipped(&self, camera: Vec3) -> Vec2 {
        let q = self.intrinsics() * camera / camera.z;
        Vec2::new(self.width as f32 - q.x, self.height as f32 - q.y)
    }
}

impl Default for PinholeCamera {
    fn default() -> Self {
        Self::with_options(&Options::default())
    }
}
