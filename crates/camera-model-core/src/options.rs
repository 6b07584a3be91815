//! Configuration options for the viewer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CameraModelError, Result};

/// Viewer configuration.
///
/// Missing fields in a JSON file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Target frames per second for both display and scene rendering.
    pub fps: u32,

    /// Initial focal length in meters.
    pub focus: f32,

    /// Sensor scale factor (pixels per meter).
    pub pixels_per_meter: f32,

    /// Lower bound for interactive focus changes.
    pub focus_min: f32,

    /// Upper bound for interactive focus changes.
    pub focus_max: f32,

    /// Focus change per key press.
    pub focus_step: f32,

    /// Camera translation per key press, in meters.
    pub move_step: f32,

    /// Camera rotation per key press, in degrees.
    pub rotate_step_degrees: f32,

    /// Minimum camera-frame depth that is drawn.
    pub near_clip: f32,

    /// Canvas clear color.
    pub background: Color,

    /// Whether the camera info overlay is visible at startup.
    pub show_info: bool,

    /// Whether the window title shows canvas size and fps.
    pub show_fps: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 800,
            height: 640,
            fps: 30,
            focus: 1.0,
            pixels_per_meter: 800.0,
            focus_min: 0.1,
            focus_max: 2000.0,
            focus_step: 0.1,
            move_step: 0.1,
            rotate_step_degrees: 1.0,
            near_clip: 0.01,
            background: Color::BLACK,
            show_info: true,
            show_fps: true,
        }
    }
}

impl Options {
    /// Parses options from a JSON string and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file and validates them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&json)?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Checks that the options describe a usable viewer.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(CameraModelError::InvalidOptions(msg));

        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.fps == 0 {
            return invalid("fps must be at least 1".to_string());
        }
        if !(self.focus_min > 0.0 && self.focus_min <= self.focus_max) {
            return invalid(format!(
                "focus limits must satisfy 0 < min <= max, got [{}, {}]",
                self.focus_min, self.focus_max
            ));
        }
        if !(self.focus_min..=self.focus_max).contains(&self.focus) {
            return invalid(format!(
                "focus {} outside [{}, {}]",
                self.focus, self.focus_min, self.focus_max
            ));
        }
        if !(self.pixels_per_meter > 0.0) {
            return invalid(format!(
                "pixels_per_meter must be positive, got {}",
                self.pixels_per_meter
            ));
        }
        for (name, value) in [
            ("focus_step", self.focus_step),
            ("move_step", self.move_step),
            ("rotate_step_degrees", self.rotate_step_degrees),
            ("near_clip", self.near_clip),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        Ok(())
    }

    /// Rotation step in radians.
    #[must_use]
    pub fn rotate_step(&self) -> f32 {
        self.rotate_step_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = Options::default();
        assert!(options.validate().is_ok());
        assert_eq!((options.width, options.height), (800, 640));
        assert!((options.rotate_step() - std::f32::consts::PI / 180.0).abs() < 1e-7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = Options::from_json_str(r#"{ "width": 320, "fps": 60 }"#).unwrap();
        assert_eq!(options.width, 320);
        assert_eq!(options.height, 640);
        assert_eq!(options.fps, 60);
    }

    #[test]
    fn test_rejects_invalid() {
        let zero_size = Options {
            width: 0,
            ..Options::default()
        };
        assert!(matches!(
            zero_size.validate(),
            Err(CameraModelError::InvalidOptions(_))
        ));

        let inverted = Options {
            focus_min: 5.0,
            focus_max: 1.0,
            ..Options::default()
        };
        assert!(inverted.validate().is_err());

        let focus_out_of_range = Options {
            focus: 3000.0,
            ..Options::default()
        };
        assert!(focus_out_of_range.validate().is_err());

        assert!(Options::from_json_str(r#"{ "near_clip": 0.0 }"#).is_err());
        assert!(Options::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{ "background": [10, 20, 30], "show_info": false }"#).unwrap();

        let options = Options::load(&path).unwrap();
        assert_eq!(options.background, Color::rgb(10, 20, 30));
        assert!(!options.show_info);

        assert!(matches!(
            Options::load(dir.path().join("missing.json")),
            Err(CameraModelError::Io(_))
        ));
    }
}
