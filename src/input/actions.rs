//! Walkthrough action definitions
//!
//! Only a fixed set of keys is recognised; every other key is ignored.

use macroquad::input::KeyCode;

/// All actions the walkthrough responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,

    // Vertical (edge triggered)
    Jump,

    // System
    ReleaseCapture,   // give the pointer back to the page
    ToggleDebug,      // player stats overlay
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::ReleaseCapture,
        Action::ToggleDebug,
    ];

    /// Keyboard binding
    pub fn key(self) -> KeyCode {
        match self {
            Action::MoveForward => KeyCode::Up,
            Action::MoveBackward => KeyCode::Down,
            Action::MoveLeft => KeyCode::Left,
            Action::MoveRight => KeyCode::Right,
            Action::Jump => KeyCode::Space,
            Action::ReleaseCapture => KeyCode::Escape,
            Action::ToggleDebug => KeyCode::F3,
        }
    }

    /// Reverse lookup; `None` for keys the walkthrough ignores
    pub fn from_key(key: KeyCode) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::MoveForward => "Forward",
            Action::MoveBackward => "Back",
            Action::MoveLeft => "Left",
            Action::MoveRight => "Right",
            Action::Jump => "Jump",
            Action::ReleaseCapture => "Release mouse",
            Action::ToggleDebug => "Debug overlay",
        }
    }
}
