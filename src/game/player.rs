//! Player movement
//!
//! Two independent axes, resolved in order every tick:
//! - horizontal: intent from held keys, rotated by yaw, validated against
//!   the walkable regions, committed or dropped as a whole
//! - vertical: a Grounded/Airborne jump arc integrated with a fixed
//!   per-tick gravity decrement
//!
//! Rates are per tick rather than per second, so movement speed follows
//! the display refresh rate.

use macroquad::math::{Quat, Vec3};
use crate::input::HeldDirections;
use crate::world::PlayerSettings;
use super::collision::RegionSet;

/// Jump state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalState {
    #[default]
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub vertical: VerticalState,
}

impl PlayerState {
    pub fn grounded_at(x: f32, z: f32, eye_height: f32) -> Self {
        Self {
            position: Vec3::new(x, eye_height, z),
            vertical_velocity: 0.0,
            vertical: VerticalState::Grounded,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.vertical == VerticalState::Airborne
    }
}

/// Result of one horizontal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No direction held
    Idle,
    Moved,
    /// Candidate fell outside every region; position unchanged
    Blocked,
}

/// Result of one vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEvent {
    None,
    TookOff,
    Landed,
}

/// Unit intent vector on the XZ plane (forward = -Z, right = +X).
///
/// When opposing keys are both held, backward beats forward and right
/// beats left. Returns zero when nothing is held.
pub fn movement_intent(held: HeldDirections) -> Vec3 {
    let mut intent = Vec3::ZERO;
    if held.forward {
        intent.z = -1.0;
    }
    if held.backward {
        intent.z = 1.0;
    }
    if held.left {
        intent.x = -1.0;
    }
    if held.right {
        intent.x = 1.0;
    }

    if intent == Vec3::ZERO {
        intent
    } else {
        intent.normalize()
    }
}

/// Owns the player state and applies movement against static regions
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub state: PlayerState,
    pub settings: PlayerSettings,
    regions: RegionSet,
    /// Candidates refused since spawn (debug overlay)
    pub blocked_steps: u32,
}

impl PlayerController {
    pub fn new(settings: PlayerSettings, regions: RegionSet) -> Self {
        let [x, z] = settings.spawn;
        Self {
            state: PlayerState::grounded_at(x, z, settings.eye_height),
            settings,
            regions,
            blocked_steps: 0,
        }
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// Proposed position for this intent and yaw, before validation
    pub fn candidate(&self, intent: Vec3, yaw: f32) -> Vec3 {
        let direction = Quat::from_rotation_y(yaw) * intent;
        self.state.position + direction * self.settings.speed
    }

    pub fn step_horizontal(&mut self, held: HeldDirections, yaw: f32) -> StepOutcome {
        let intent = movement_intent(held);
        if intent == Vec3::ZERO {
            return StepOutcome::Idle;
        }

        let candidate = self.candidate(intent, yaw);
        if self.regions.is_allowed(candidate) {
            self.state.position = candidate;
            StepOutcome::Moved
        } else {
            self.blocked_steps = self.blocked_steps.saturating_add(1);
            StepOutcome::Blocked
        }
    }

    pub fn step_vertical(&mut self, jump_pressed: bool) -> VerticalEvent {
        let mut event = VerticalEvent::None;
        let state = &mut self.state;

        if jump_pressed && state.vertical == VerticalState::Grounded {
            state.vertical = VerticalState::Airborne;
            state.vertical_velocity = self.settings.jump_speed;
            event = VerticalEvent::TookOff;
        }

        if state.vertical == VerticalState::Airborne {
            state.position.y += state.vertical_velocity;
            state.vertical_velocity -= self.settings.gravity;

            if state.position.y <= self.settings.eye_height {
                state.position.y = self.settings.eye_height;
                state.vertical_velocity = 0.0;
                state.vertical = VerticalState::Grounded;
                event = VerticalEvent::Landed;
            }
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use approx::assert_abs_diff_eq;
    use crate::world::{FloorPlan, LayoutConfig};

    fn controller() -> PlayerController {
        let settings = PlayerSettings::default();
        let plan = FloorPlan::new(&LayoutConfig::default(), settings.wall_margin);
        PlayerController::new(settings, RegionSet::from_floor_plan(&plan))
    }

    fn held_forward() -> HeldDirections {
        HeldDirections { forward: true, ..Default::default() }
    }

    #[test]
    fn test_spawn_is_grounded_at_eye_height() {
        let player = controller();
        assert_eq!(player.state.position, Vec3::new(0.0, 1.2, 0.0));
        assert!(!player.state.is_airborne());
    }

    #[test]
    fn test_no_keys_leaves_position_unchanged() {
        let mut player = controller();
        player.state.position = Vec3::new(0.3, 1.2, -4.0);
        let before = player.state;
        assert_eq!(player.step_horizontal(HeldDirections::default(), 1.3), StepOutcome::Idle);
        assert_eq!(player.state, before);
    }

    #[test]
    fn test_forward_from_corridor_origin() {
        let mut player = controller();
        assert_eq!(player.step_horizontal(held_forward(), 0.0), StepOutcome::Moved);
        assert_eq!(player.state.position, Vec3::new(0.0, 1.2, -0.1));
    }

    #[test]
    fn test_move_into_wall_rejected() {
        let mut player = controller();
        // Corridor's west edge sits at x = -1.5 after the margin
        player.state.position = Vec3::new(-1.45, 1.2, 0.0);
        let before = player.state.position;
        let left = HeldDirections { left: true, ..Default::default() };

        assert_eq!(player.step_horizontal(left, 0.0), StepOutcome::Blocked);
        assert_eq!(player.state.position, before);
        assert_eq!(player.blocked_steps, 1);
    }

    #[test]
    fn test_blocked_counter_saturates() {
        let mut player = controller();
        player.state.position = Vec3::new(-1.45, 1.2, 0.0);
        player.blocked_steps = u32::MAX;
        let left = HeldDirections { left: true, ..Default::default() };

        assert_eq!(player.step_horizontal(left, 0.0), StepOutcome::Blocked);
        assert_eq!(player.blocked_steps, u32::MAX);
    }

    #[test]
    fn test_yaw_rotates_intent() {
        let player = controller();
        let candidate = player.candidate(movement_intent(held_forward()), FRAC_PI_2);
        // Facing -X after a quarter turn to the left
        assert_abs_diff_eq!(candidate.x, -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(candidate.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_diagonal_intent_is_unit_length() {
        let held = HeldDirections { forward: true, right: true, ..Default::default() };
        let intent = movement_intent(held);
        assert_abs_diff_eq!(intent.length(), 1.0, epsilon = 1e-6);
        assert!(intent.x > 0.0 && intent.z < 0.0);
    }

    #[test]
    fn test_opposing_keys_later_wins() {
        let held = HeldDirections { forward: true, backward: true, ..Default::default() };
        assert_eq!(movement_intent(held), Vec3::new(0.0, 0.0, 1.0));
        let held = HeldDirections { left: true, right: true, ..Default::default() };
        assert_eq!(movement_intent(held), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_jump_round_trip_lands_exactly() {
        let mut player = controller();
        assert_eq!(player.step_vertical(true), VerticalEvent::TookOff);
        assert!(player.state.is_airborne());

        let mut ticks = 1;
        let mut peak = player.state.position.y;
        while player.state.is_airborne() {
            assert_ne!(player.step_vertical(false), VerticalEvent::TookOff);
            peak = peak.max(player.state.position.y);
            ticks += 1;
            assert!(ticks < 1000, "jump never landed");
        }

        assert!(peak > 1.2);
        assert_eq!(player.state.position.y, 1.2);
        assert_eq!(player.state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut player = controller();
        player.step_vertical(true);
        player.step_vertical(false);
        let velocity = player.state.vertical_velocity;
        assert_eq!(player.step_vertical(true), VerticalEvent::None);
        assert_abs_diff_eq!(player.state.vertical_velocity, velocity - 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_can_jump_again_after_landing() {
        let mut player = controller();
        player.step_vertical(true);
        while player.state.is_airborne() {
            player.step_vertical(false);
        }
        assert_eq!(player.step_vertical(true), VerticalEvent::TookOff);
    }

    #[test]
    fn test_horizontal_moves_while_airborne() {
        let mut player = controller();
        player.step_vertical(true);
        assert_eq!(player.step_horizontal(held_forward(), 0.0), StepOutcome::Moved);
        assert_abs_diff_eq!(player.state.position.z, -0.1, epsilon = 1e-6);
    }
}
