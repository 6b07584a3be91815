//! Incremental camera adjustments driven by user input.

use glam::Vec3;

use crate::camera::PinholeCamera;
use crate::error::Result;
use crate::options::Options;

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// One step of camera adjustment. The payload is the step direction, `1.0` or `-1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    Yaw(f32),
    Pitch(f32),
    Roll(f32),
    Focus(f32),
    Move(Axis, f32),
}

impl CameraCommand {
    /// Applies this command to `camera` using the step sizes from `options`.
    ///
    /// Focus changes are clamped to `[focus_min, focus_max]`.
    pub fn apply(self, camera: &mut PinholeCamera, options: &Options) -> Result<()> {
        let angle = options.rotate_step();
        match self {
            CameraCommand::Yaw(sign) => camera.set_yaw(camera.yaw() + sign * angle),
            CameraCommand::Pitch(sign) => camera.set_pitch(camera.pitch() + sign * angle),
            CameraCommand::Roll(sign) => camera.set_roll(camera.roll() + sign * angle),
            CameraCommand::Focus(sign) => {
                let focus = (camera.focus() + sign * options.focus_step)
                    .clamp(options.focus_min, options.focus_max);
                camera.set_focus(focus)?;
            }
            CameraCommand::Move(axis, sign) => {
                camera.translate(axis.unit() * sign * options.move_step);
            }
        }
        log::trace!("{self:?} -> {:?}", camera.info());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_rotation_steps() {
        let options = Options::default();
        let mut camera = PinholeCamera::with_options(&options);
        CameraCommand::Yaw(1.0).apply(&mut camera, &options).unwrap();
        CameraCommand::Yaw(1.0).apply(&mut camera, &options).unwrap();
        CameraCommand::Pitch(-1.0).apply(&mut camera, &options).unwrap();
        CameraCommand::Roll(1.0).apply(&mut camera, &options).unwrap();

        let step = 1f32.to_radians();
        assert_close(camera.yaw(), 2.0 * step);
        assert_close(camera.pitch(), -step);
        assert_close(camera.roll(), step);
    }

    #[test]
    fn test_move_steps() {
        let options = Options::default();
        let mut camera = PinholeCamera::with_options(&options);
        CameraCommand::Move(Axis::Z, -1.0)
            .apply(&mut camera, &options)
            .unwrap();
        CameraCommand::Move(Axis::X, 1.0)
            .apply(&mut camera, &options)
            .unwrap();
        let p = camera.position();
        assert_close(p.x, 0.1);
        assert_close(p.y, 0.0);
        assert_close(p.z, -0.1);
    }

    #[test]
    fn test_focus_is_clamped() {
        let options = Options {
            focus: 0.15,
            focus_max: 0.3,
            ..Options::default()
        };
        let mut camera = PinholeCamera::with_options(&options);
        CameraCommand::Focus(-1.0).apply(&mut camera, &options).unwrap();
        assert_close(camera.focus(), options.focus_min);
        CameraCommand::Focus(-1.0).apply(&mut camera, &options).unwrap();
        assert_close(camera.focus(), options.focus_min);

        for _ in 0..5 {
            CameraCommand::Focus(1.0).apply(&mut camera, &options).unwrap();
        }
        assert_close(camera.focus(), 0.3);
    }
}
