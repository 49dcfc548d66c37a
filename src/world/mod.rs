//! World module - static description of the walkthrough space
//!
//! - `config`: the RON configuration every other piece reads from
//! - `floor_plan`: placements and walkable regions
//! - `layout`: procedural scene tree (floors, walls, outlines, notes, panels)

mod config;
mod floor_plan;
mod layout;

pub use config::*;
pub use floor_plan::*;
pub use layout::*;
