//! Application state
//!
//! Everything the main loop owns: the baked scene, the walkthrough
//! instance and the input poller.

use macroquad::logging::info;
use crate::game::{text_panel, SceneMeshes, Walkthrough};
use crate::input::InputState;
use crate::world::{build_scene, FloorPlan, WalkthroughConfig};

pub struct AppState {
    pub scene: SceneMeshes,
    pub walkthrough: Walkthrough,
    pub input: InputState,
}

impl AppState {
    /// Build the scene and spawn the player. Needs a live GL context (text
    /// panels are rendered into textures here).
    pub fn new(config: &WalkthroughConfig) -> Self {
        let plan = FloorPlan::new(&config.layout, config.player.wall_margin);
        let tree = build_scene(config, &plan);
        let scene = SceneMeshes::build(&tree, config, |text| Some(text_panel::render_text_texture(text)));

        info!(
            "Scene built: {} primitives, {} meshes, {} outline segments",
            tree.primitive_count(),
            scene.meshes.len() + scene.overlays.len(),
            scene.edges.len()
        );
        for (name, region) in [
            ("room A", plan.room_a_region()),
            ("room B", plan.room_b_region()),
            ("corridor", plan.corridor_region()),
        ] {
            info!(
                "Walkable {}: x {:.2}..{:.2}, z {:.2}..{:.2} ({:.2} x {:.2})",
                name, region.min_x, region.max_x, region.min_z, region.max_z, region.width(), region.depth()
            );
        }

        let walkthrough = Walkthrough::new(config, &plan);
        info!(
            "Player spawned at {:?} with {} walkable regions",
            walkthrough.player.state.position,
            walkthrough.player.regions().regions().len()
        );

        Self {
            scene,
            walkthrough,
            input: InputState::new(),
        }
    }

    /// One frame: sample input, simulate, draw
    pub fn frame(&mut self) {
        let snapshot = self.input.sample();
        let report = self.walkthrough.tick(&snapshot);

        self.scene.draw(&self.walkthrough.camera);

        crate::game::draw_crosshair();
        if !self.input.is_captured() {
            crate::game::draw_controls_hint();
        }
        if self.walkthrough.show_debug_overlay {
            crate::game::draw_debug_overlay(&self.walkthrough, &report);
        }
    }
}
