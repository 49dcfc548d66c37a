//! Walkthrough simulation and rendering
//!
//! Key pieces:
//! - PlayerController: horizontal steps validated against walkable regions,
//!   plus the Grounded/Airborne jump arc
//! - LookState: yaw/pitch from pointer motion
//! - FirstPersonCamera: FOV and aspect around macroquad's Camera3D
//! - Walkthrough: one instance of all of the above, ticked once per frame
//! - SceneMeshes: the static scene baked into shaded meshes

pub mod camera;
pub mod collision;
pub mod look;
pub mod player;
pub mod renderer;
pub mod runtime;
pub mod text_panel;

pub use renderer::{draw_controls_hint, draw_crosshair, draw_debug_overlay, SceneMeshes};
pub use runtime::Walkthrough;
