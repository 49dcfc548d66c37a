//! Keyboard and mouse input
//!
//! Action-based key mapping plus a once-per-tick input snapshot.
//! Works the same natively and in the browser (macroquad handles the
//! pointer lock request on WASM).

mod actions;
mod state;

pub use actions::*;
pub use state::*;
