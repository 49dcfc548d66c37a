//! Walkthrough Runtime
//!
//! One walkthrough instance: the player controller, look angles and camera.
//! Each tick consumes one input snapshot and resolves, in order:
//! look → horizontal → vertical → camera.

use crate::input::InputSnapshot;
use crate::world::{FloorPlan, WalkthroughConfig};
use super::camera::FirstPersonCamera;
use super::collision::RegionSet;
use super::look::LookState;
use super::player::{PlayerController, StepOutcome, VerticalEvent};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub step: StepOutcome,
    pub vertical: VerticalEvent,
    pub resized: bool,
}

pub struct Walkthrough {
    pub player: PlayerController,
    pub look: LookState,
    pub camera: FirstPersonCamera,
    pub look_sensitivity: f32,
    /// Show the debug overlay
    pub show_debug_overlay: bool,
}

impl Walkthrough {
    pub fn new(config: &WalkthroughConfig, plan: &FloorPlan) -> Self {
        let player = PlayerController::new(config.player.clone(), RegionSet::from_floor_plan(plan));
        let mut walkthrough = Self {
            player,
            look: LookState::default(),
            camera: FirstPersonCamera::new(config.camera.clone()),
            look_sensitivity: config.look.sensitivity,
            show_debug_overlay: false,
        };
        walkthrough.sync_camera();
        walkthrough
    }

    /// Run one simulation tick
    pub fn tick(&mut self, input: &InputSnapshot) -> TickReport {
        if input.toggle_debug {
            self.show_debug_overlay = !self.show_debug_overlay;
        }
        if input.captured {
            self.look.apply_pointer_delta(input.look_delta, self.look_sensitivity);
        }
        self.camera.apply_wheel(input.wheel);
        let resized = self.camera.resize(input.screen_size);

        let step = self.player.step_horizontal(input.held, self.look.yaw);
        let vertical = self.player.step_vertical(input.jump_pressed);
        self.sync_camera();

        TickReport { step, vertical, resized }
    }

    /// Camera follows the player's eye and the current look angles
    fn sync_camera(&mut self) {
        self.camera.position = self.player.state.position;
        self.camera.orientation = self.look.orientation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use macroquad::math::{Vec2, Vec3};
    use crate::input::HeldDirections;

    fn walkthrough() -> Walkthrough {
        let config = WalkthroughConfig::default();
        let plan = FloorPlan::new(&config.layout, config.player.wall_margin);
        Walkthrough::new(&config, &plan)
    }

    fn forward_input() -> InputSnapshot {
        InputSnapshot {
            held: HeldDirections { forward: true, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn test_camera_tracks_player_after_tick() {
        let mut walk = walkthrough();
        let report = walk.tick(&InputSnapshot { jump_pressed: true, ..forward_input() });
        assert_eq!(report.step, StepOutcome::Moved);
        assert_eq!(report.vertical, VerticalEvent::TookOff);
        assert_eq!(walk.camera.position, walk.player.state.position);
        assert!(walk.camera.position.y > 1.2);
    }

    #[test]
    fn test_look_ignored_without_capture() {
        let mut walk = walkthrough();
        walk.tick(&InputSnapshot { look_delta: Vec2::new(300.0, 40.0), ..Default::default() });
        assert_eq!(walk.look, LookState::default());
    }

    #[test]
    fn test_look_applies_before_movement() {
        let mut walk = walkthrough();
        // 785.4 px * 0.002 = quarter turn to the left
        let input = InputSnapshot {
            captured: true,
            look_delta: Vec2::new(-785.398_2, 0.0),
            ..forward_input()
        };
        walk.tick(&input);
        let pos = walk.player.state.position;
        assert_abs_diff_eq!(pos.x, -0.1, epsilon = 1e-4);
        assert_abs_diff_eq!(pos.z, 0.0, epsilon = 1e-4);

        let forward = walk.camera.forward();
        assert_abs_diff_eq!(forward.x, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_walking_into_wall_stops_at_edge() {
        let mut walk = walkthrough();
        let input = forward_input();
        for _ in 0..200 {
            walk.tick(&input);
        }
        let pos = walk.player.state.position;
        assert!(pos.z >= -11.5);
        assert!(pos.z < -11.3);
        assert_eq!(walk.tick(&input).step, StepOutcome::Blocked);
        assert_eq!(walk.player.state.position, pos);
    }

    #[test]
    fn test_debug_toggle() {
        let mut walk = walkthrough();
        walk.tick(&InputSnapshot { toggle_debug: true, ..Default::default() });
        assert!(walk.show_debug_overlay);
        walk.tick(&InputSnapshot::default());
        assert!(walk.show_debug_overlay);
    }

    #[test]
    fn test_idle_tick_keeps_spawn() {
        let mut walk = walkthrough();
        let report = walk.tick(&InputSnapshot::default());
        assert_eq!(report.step, StepOutcome::Idle);
        assert_eq!(walk.player.state.position, Vec3::new(0.0, 1.2, 0.0));
    }
}
