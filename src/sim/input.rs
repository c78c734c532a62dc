//! Keyboard input
//!
//! Raw key events arrive between frames and only move per-button state
//! machines. The frame loop samples them once at the start of each frame.

use crate::settings::KeyBindings;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Shield,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::RotateLeft,
        Button::RotateRight,
        Button::Thrust,
        Button::Fire,
        Button::Shield,
    ];

    fn index(self) -> usize {
        match self {
            Button::RotateLeft => 0,
            Button::RotateRight => 1,
            Button::Thrust => 2,
            Button::Fire => 3,
            Button::Shield => 4,
        }
    }
}

/// Per-button state machine
///
/// `Idle --down--> Pressed --sample--> Held --up--> Idle`. Key repeat while
/// `Pressed` or `Held` changes nothing, so a button is `Pressed` for exactly
/// one sampled frame per physical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Pressed,
    Held,
}

impl ButtonState {
    pub fn on_key_down(self) -> Self {
        match self {
            ButtonState::Idle => ButtonState::Pressed,
            other => other,
        }
    }

    pub fn on_key_up(self) -> Self {
        ButtonState::Idle
    }

    pub fn on_sampled(self) -> Self {
        match self {
            ButtonState::Pressed => ButtonState::Held,
            other => other,
        }
    }

    pub fn is_down(self) -> bool {
        self != ButtonState::Idle
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    /// Edge: true only on the first frame of a press
    pub fire: bool,
    pub shield: bool,
}

/// Keyboard state for the five logical buttons
#[derive(Debug, Clone, Default)]
pub struct Controls {
    bindings: KeyBindings,
    states: [ButtonState; 5],
}

impl Controls {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            states: [ButtonState::Idle; 5],
        }
    }

    /// Physical key pressed; returns the button it maps to, if any
    pub fn key_down(&mut self, key: &str) -> Option<Button> {
        let button = self.bindings.button_for(key)?;
        self.press(button);
        Some(button)
    }

    /// Physical key released
    pub fn key_up(&mut self, key: &str) -> Option<Button> {
        let button = self.bindings.button_for(key)?;
        self.release(button);
        Some(button)
    }

    pub fn press(&mut self, button: Button) {
        let slot = &mut self.states[button.index()];
        *slot = slot.on_key_down();
    }

    pub fn release(&mut self, button: Button) {
        let slot = &mut self.states[button.index()];
        *slot = slot.on_key_up();
    }

    /// Release everything (focus loss)
    pub fn release_all(&mut self) {
        self.states = [ButtonState::Idle; 5];
    }

    pub fn state(&self, button: Button) -> ButtonState {
        self.states[button.index()]
    }

    /// Read this frame's commands and latch fresh presses into `Held`
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            rotate_left: self.state(Button::RotateLeft).is_down(),
            rotate_right: self.state(Button::RotateRight).is_down(),
            thrust: self.state(Button::Thrust).is_down(),
            fire: self.state(Button::Fire) == ButtonState::Pressed,
            shield: self.state(Button::Shield).is_down(),
        };
        for state in &mut self.states {
            *state = state.on_sampled();
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut controls = Controls::default();
        controls.key_down("Enter");
        assert!(controls.sample().fire);
        // Still held (plus key repeat) - no further shots
        controls.key_down("Enter");
        assert!(!controls.sample().fire);
        assert!(!controls.sample().fire);
        assert_eq!(controls.state(Button::Fire), ButtonState::Held);

        controls.key_up("Enter");
        assert!(!controls.sample().fire);
        controls.key_down("enter");
        assert!(controls.sample().fire);
    }

    #[test]
    fn test_held_buttons_are_level_triggered() {
        let mut controls = Controls::default();
        controls.key_down("ctrl");
        controls.key_down("a");
        for _ in 0..3 {
            let input = controls.sample();
            assert!(input.thrust && input.rotate_left);
            assert!(!input.rotate_right);
        }
        controls.key_up("Control");
        assert!(!controls.sample().thrust);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut controls = Controls::default();
        assert_eq!(controls.key_down("x"), None);
        assert_eq!(controls.sample(), TickInput::default());
    }

    #[test]
    fn test_release_all() {
        let mut controls = Controls::default();
        controls.press(Button::Shield);
        controls.press(Button::Thrust);
        controls.release_all();
        assert_eq!(controls.sample(), TickInput::default());
    }
}
