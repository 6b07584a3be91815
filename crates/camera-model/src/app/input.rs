use super::{
    ActiveEventLoop, App, ApplicationHandler, Arc, ControlFlow, ElementState, FutureExt, KeyCode,
    PhysicalKey, PhysicalSize, Presenter, Window, WindowEvent, WindowId,
};
use crate::{Axis, CameraCommand, CameraModelError};

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum KeyAction {
    Quit,
    ToggleInfo,
    Screenshot,
    Camera(CameraCommand),
}

/// Maps a physical key to its action, if it has one.
pub(crate) fn action_for_key(code: KeyCode) -> Option<KeyAction> {
    use CameraCommand::{Focus, Move, Pitch, Roll, Yaw};

    let command = match code {
        KeyCode::Escape => return Some(KeyAction::Quit),
        KeyCode::KeyI => return Some(KeyAction::ToggleInfo),
        KeyCode::F12 => return Some(KeyAction::Screenshot),
        KeyCode::ArrowLeft => Yaw(1.0),
        KeyCode::ArrowRight => Yaw(-1.0),
        KeyCode::ArrowUp => Pitch(-1.0),
        KeyCode::ArrowDown => Pitch(1.0),
        KeyCode::Comma => Roll(1.0),
        KeyCode::Period => Roll(-1.0),
        KeyCode::Minus => Focus(-1.0),
        KeyCode::Equal => Focus(1.0),
        KeyCode::KeyQ => Move(Axis::Z, -1.0),
        KeyCode::KeyE => Move(Axis::Z, 1.0),
        KeyCode::KeyW => Move(Axis::Y, 1.0),
        KeyCode::KeyS => Move(Axis::Y, -1.0),
        KeyCode::KeyA => Move(Axis::X, 1.0),
        KeyCode::KeyD => Move(Axis::X, -1.0),
        _ => return None,
    };
    Some(KeyAction::Camera(command))
}

impl App {
    fn handle_key(&mut self, code: KeyCode) {
        let Some(action) = action_for_key(code) else {
            return;
        };
        log::debug!("{code:?} -> {action:?}");
        match action {
            KeyAction::Quit => self.close_requested = true,
            KeyAction::ToggleInfo => self.show_info = !self.show_info,
            KeyAction::Screenshot => self.save_screenshot(),
            KeyAction::Camera(command) => {
                let mut camera = self.camera.write();
                if let Err(e) = command.apply(&mut camera, &self.options) {
                    log::warn!("{command:?} rejected: {e}");
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(CameraModelError::Render(format!("failed to create window: {e}")));
                event_loop.exit();
                return;
            }
        };

        match Presenter::new_windowed(window.clone(), self.options.width, self.options.height)
            .block_on()
        {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => {
                self.fail(e.into());
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Held keys repeat, so the camera keeps moving
                if let (PhysicalKey::Code(code), ElementState::Pressed) =
                    (event.physical_key, event.state)
                {
                    self.handle_key(code);
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.close_requested {
            event_loop.exit();
            return;
        }

        let now = std::time::Instant::now();
        if now >= self.next_redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_redraw = now + self.clock.frame_time();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_redraw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_keys() {
        assert_eq!(action_for_key(KeyCode::Escape), Some(KeyAction::Quit));
        assert_eq!(action_for_key(KeyCode::KeyI), Some(KeyAction::ToggleInfo));
        assert_eq!(action_for_key(KeyCode::F12), Some(KeyAction::Screenshot));
        assert_eq!(action_for_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_camera_keys_come_in_opposite_pairs() {
        let pairs = [
            (KeyCode::ArrowLeft, KeyCode::ArrowRight),
            (KeyCode::ArrowDown, KeyCode::ArrowUp),
            (KeyCode::Comma, KeyCode::Period),
            (KeyCode::Equal, KeyCode::Minus),
            (KeyCode::KeyE, KeyCode::KeyQ),
            (KeyCode::KeyW, KeyCode::KeyS),
            (KeyCode::KeyA, KeyCode::KeyD),
        ];
        for (plus, minus) in pairs {
            let (Some(KeyAction::Camera(a)), Some(KeyAction::Camera(b))) =
                (action_for_key(plus), action_for_key(minus))
            else {
                panic!("{plus:?}/{minus:?} should move the camera");
            };
            let (kind_a, sign_a) = split(a);
            let (kind_b, sign_b) = split(b);
            assert_eq!(kind_a, kind_b);
            assert_eq!((sign_a, sign_b), (1.0, -1.0), "{plus:?}/{minus:?}");
        }
    }

    fn split(command: CameraCommand) -> (String, f32) {
        match command {
            CameraCommand::Yaw(s) => ("yaw".into(), s),
            CameraCommand::Pitch(s) => ("pitch".into(), s),
            CameraCommand::Roll(s) => ("roll".into(), s),
            CameraCommand::Focus(s) => ("focus".into(), s),
            CameraCommand::Move(axis, s) => (format!("{axis:?}"), s),
        }
    }

    #[test]
    fn test_movement_directions() {
        assert_eq!(
            action_for_key(KeyCode::KeyQ),
            Some(KeyAction::Camera(CameraCommand::Move(Axis::Z, -1.0)))
        );
        assert_eq!(
            action_for_key(KeyCode::KeyA),
            Some(KeyAction::Camera(CameraCommand::Move(Axis::X, 1.0)))
        );
        assert_eq!(
            action_for_key(KeyCode::ArrowUp),
            Some(KeyAction::Camera(CameraCommand::Pitch(-1.0)))
        );
    }
}
