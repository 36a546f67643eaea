use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    /// Same buttons in press order, for get_down_keys
    pressed_vec: Vec<Button>,
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    scroll_delta: f32,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a window event the overlay may have consumed into the input state.
    ///
    /// A consumed event never starts input (press, wheel, drag delta), but
    /// releases and cursor positions always land so no button stays held.
    pub fn process_routed(&mut self, event: &WindowEvent, consumed: bool) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.apply_button(button, event.state, consumed);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.apply_button(btn, *state, consumed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor((position.x as f32, position.y as f32), consumed);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Clear per-frame accumulators; call after the frame consumed them
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    fn apply_button(&mut self, button: Button, state: ElementState, consumed: bool) {
        if consumed && state == ElementState::Pressed {
            return;
        }
        self.set_state(button, state);
    }

    fn move_cursor(&mut self, new_pos: (f32, f32), consumed: bool) {
        if let (Some(old_pos), false) = (self.mouse_position, consumed) {
            self.mouse_delta.0 += new_pos.0 - old_pos.0;
            self.mouse_delta.1 += new_pos.1 - old_pos.1;
        }
        self.mouse_position = Some(new_pos);
    }

    fn set_state(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    /// Drop held buttons; releases are not delivered while unfocused
    fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Button::KeyW),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Button::KeyA),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Button::KeyS),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(Button::Digit1),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(Button::Digit2),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(Button::Digit3),
            KeyCode::Digit4 | KeyCode::Numpad4 => Some(Button::Digit4),
            KeyCode::Digit5 | KeyCode::Numpad5 => Some(Button::Digit5),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events carry platform-private fields (DeviceId, KeyEvent internals),
    // so state transitions are driven through set_state directly.

    #[test]
    fn new_controller_is_idle() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::KeyW));
        assert!(controller.get_down_keys().is_empty());
        assert_eq!(controller.mouse_position(), None);
        assert_eq!(controller.mouse_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
    }

    #[test]
    fn press_and_release_track_order() {
        let mut controller = WinitController::new();
        controller.set_state(Button::Digit2, ElementState::Pressed);
        controller.set_state(Button::MouseLeft, ElementState::Pressed);
        controller.set_state(Button::Digit2, ElementState::Pressed);

        assert_eq!(controller.get_down_keys(), &[Button::Digit2, Button::MouseLeft]);

        controller.set_state(Button::Digit2, ElementState::Released);
        assert!(!controller.is_down(Button::Digit2));
        assert_eq!(controller.get_down_keys(), &[Button::MouseLeft]);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut controller = WinitController::new();
        controller.set_state(Button::KeyA, ElementState::Pressed);
        controller.process_routed(&WindowEvent::Focused(false), true);
        assert!(controller.get_down_keys().is_empty());
    }

    #[test]
    fn delta_reset_keeps_position() {
        let mut controller = WinitController::new();
        controller.mouse_delta = (10.0, 5.0);
        controller.scroll_delta = 2.0;
        controller.mouse_position = Some((100.0, 200.0));

        controller.reset_deltas();
        assert_eq!(controller.mouse_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
        assert_eq!(controller.mouse_position(), Some((100.0, 200.0)));
    }

    #[test]
    fn consumed_release_still_lets_go() {
        let mut controller = WinitController::new();
        controller.apply_button(Button::MouseLeft, ElementState::Pressed, false);
        assert!(controller.is_down(Button::MouseLeft));

        // Released over an overlay window
        controller.apply_button(Button::MouseLeft, ElementState::Released, true);
        assert!(!controller.is_down(Button::MouseLeft));
        assert!(controller.get_down_keys().is_empty());
    }

    #[test]
    fn consumed_press_is_ignored() {
        let mut controller = WinitController::new();
        controller.apply_button(Button::MouseLeft, ElementState::Pressed, true);
        assert!(!controller.is_down(Button::MouseLeft));
    }

    #[test]
    fn consumed_move_tracks_position_without_delta() {
        let mut controller = WinitController::new();
        controller.move_cursor((10.0, 10.0), false);
        controller.move_cursor((60.0, 30.0), true);
        assert_eq!(controller.mouse_delta(), (0.0, 0.0));
        assert_eq!(controller.mouse_position(), Some((60.0, 30.0)));

        // Next free move measures from the tracked position, no jump
        controller.move_cursor((65.0, 30.0), false);
        assert_eq!(controller.mouse_delta(), (5.0, 0.0));
    }

    #[test]
    fn digits_and_numpad_map_to_speed_keys() {
        assert_eq!(WinitController::keycode_to_button(KeyCode::Digit1), Some(Button::Digit1));
        assert_eq!(WinitController::keycode_to_button(KeyCode::Numpad5), Some(Button::Digit5));
        assert_eq!(WinitController::keycode_to_button(KeyCode::ArrowLeft), Some(Button::KeyA));
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyZ), None);
    }
}
