/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Escape,
    MouseLeft,
    MouseRight,
}

impl Button {
    /// Keys bound to the speed presets, in preset order
    pub const SPEED_KEYS: [Button; 5] = [
        Button::Digit1,
        Button::Digit2,
        Button::Digit3,
        Button::Digit4,
        Button::Digit5,
    ];
}

/// Controller - input state sampled once per frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Cursor movement in pixels since the last frame
    fn mouse_delta(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Wheel movement in lines since the last frame, positive away from the user
    fn scroll_delta(&self) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct MockController {
        pressed: Vec<Button>,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.pressed
        }
    }

    #[test]
    fn speed_keys_are_distinct_digits() {
        let set: HashSet<_> = Button::SPEED_KEYS.iter().collect();
        assert_eq!(set.len(), 5);
        assert_eq!(Button::SPEED_KEYS[0], Button::Digit1);
        assert_eq!(Button::SPEED_KEYS[4], Button::Digit5);
    }

    #[test]
    fn controller_reports_pressed_buttons() {
        let controller = MockController {
            pressed: vec![Button::KeyW, Button::Digit3],
        };

        assert!(controller.is_down(Button::KeyW));
        assert!(controller.is_down(Button::Digit3));
        assert!(!controller.is_down(Button::KeyA));
        assert_eq!(controller.get_down_keys().len(), 2);
    }

    #[test]
    fn pointer_deltas_default_to_zero() {
        let controller = MockController { pressed: vec![] };
        assert_eq!(controller.mouse_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
    }
}
