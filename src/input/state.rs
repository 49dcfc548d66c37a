//! Input state management
//!
//! Polls macroquad once per tick and freezes the result into an
//! [`InputSnapshot`]. The simulation only ever reads the snapshot, so input
//! can't change halfway through a tick.

use macroquad::prelude::*;
use macroquad::logging::info;
use super::Action;

/// Direction keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the simulation needs from one tick of input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pub held: HeldDirections,
    /// Jump key went down this tick
    pub jump_pressed: bool,
    /// Pointer motion in pixels since last tick (zero unless captured)
    pub look_delta: Vec2,
    /// Wheel notches this tick (-1, 0 or 1), positive = up
    pub wheel: f32,
    /// Exclusive pointer capture is active
    pub captured: bool,
    pub toggle_debug: bool,
    pub screen_size: Vec2,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            held: HeldDirections::default(),
            jump_pressed: false,
            look_delta: Vec2::ZERO,
            wheel: 0.0,
            captured: false,
            toggle_debug: false,
            screen_size: Vec2::new(1.0, 1.0),
        }
    }
}

/// What the capture flag should do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    Keep,
    /// Request the grab. Also issued while already captured: browsers drop
    /// pointer lock on Escape without always forwarding the key, so a click
    /// re-syncs the lock with the flag.
    Grab,
    Release,
}

impl CaptureRequest {
    pub fn from_input(captured: bool, release_pressed: bool, clicked: bool) -> Self {
        if captured && release_pressed {
            CaptureRequest::Release
        } else if clicked {
            CaptureRequest::Grab
        } else {
            CaptureRequest::Keep
        }
    }
}

/// Owns the pointer-capture flag and the last cursor position
pub struct InputState {
    captured: bool,
    last_mouse: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            captured: false,
            last_mouse: None,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    fn set_captured(&mut self, captured: bool) {
        let was_captured = self.captured;
        self.captured = captured;
        set_cursor_grab(captured);
        show_mouse(!captured);
        // Drop the stale position so the first captured frame has no jump
        self.last_mouse = None;
        match (was_captured, captured) {
            (false, true) => info!("Pointer capture acquired"),
            (true, true) => info!("Pointer capture re-requested"),
            (true, false) => info!("Pointer capture released"),
            (false, false) => {}
        }
    }

    /// Call once at the start of every tick
    pub fn sample(&mut self) -> InputSnapshot {
        // Wheel scale differs per platform; count one notch per tick
        let wheel = mouse_wheel().1;
        let mut snapshot = InputSnapshot {
            screen_size: Vec2::new(screen_width(), screen_height()),
            wheel: if wheel == 0.0 { 0.0 } else { wheel.signum() },
            ..Default::default()
        };

        for action in get_keys_down().into_iter().filter_map(Action::from_key) {
            match action {
                Action::MoveForward => snapshot.held.forward = true,
                Action::MoveBackward => snapshot.held.backward = true,
                Action::MoveLeft => snapshot.held.left = true,
                Action::MoveRight => snapshot.held.right = true,
                _ => {}
            }
        }

        let mut release_pressed = false;
        for action in get_keys_pressed().into_iter().filter_map(Action::from_key) {
            match action {
                Action::Jump => snapshot.jump_pressed = true,
                Action::ReleaseCapture => release_pressed = true,
                Action::ToggleDebug => snapshot.toggle_debug = true,
                _ => {}
            }
        }

        let clicked = is_mouse_button_pressed(MouseButton::Left);
        match CaptureRequest::from_input(self.captured, release_pressed, clicked) {
            CaptureRequest::Grab => self.set_captured(true),
            CaptureRequest::Release => self.set_captured(false),
            CaptureRequest::Keep => {}
        }

        let mouse = Vec2::from(mouse_position());
        if self.captured {
            if let Some(last) = self.last_mouse {
                snapshot.look_delta = mouse - last;
            }
            self.last_mouse = Some(mouse);
        }
        snapshot.captured = self.captured;

        snapshot
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_grabs_when_free() {
        assert_eq!(CaptureRequest::from_input(false, false, true), CaptureRequest::Grab);
        assert_eq!(CaptureRequest::from_input(false, false, false), CaptureRequest::Keep);
    }

    #[test]
    fn test_click_while_captured_requests_grab_again() {
        // Lock may already be gone on the browser side
        assert_eq!(CaptureRequest::from_input(true, false, true), CaptureRequest::Grab);
    }

    #[test]
    fn test_escape_releases_only_when_captured() {
        assert_eq!(CaptureRequest::from_input(true, true, false), CaptureRequest::Release);
        assert_eq!(CaptureRequest::from_input(true, true, true), CaptureRequest::Release);
        assert_eq!(CaptureRequest::from_input(false, true, false), CaptureRequest::Keep);
    }
}
