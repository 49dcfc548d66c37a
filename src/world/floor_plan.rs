//! Floor plan: where each space sits and where the player may walk
//!
//! Both the scene builder and the collision check read from the same
//! [`FloorPlan`], which is computed once from a [`LayoutConfig`].

use std::f32::consts::{FRAC_PI_2, PI};
use super::config::LayoutConfig;

/// Axis-aligned rectangle on the XZ plane (boundaries inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Region {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self { min_x, max_x, min_z, max_z }
    }

    /// Move every edge inward by `margin`
    pub fn shrink(self, margin: f32) -> Self {
        Self {
            min_x: self.min_x + margin,
            max_x: self.max_x - margin,
            min_z: self.min_z + margin,
            max_z: self.max_z - margin,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }
}

/// Where a space is placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub z: f32,
    pub rotation_y: f32,
}

impl Placement {
    pub fn new(x: f32, z: f32, rotation_y: f32) -> Self {
        Self { x, z, rotation_y }
    }
}

/// Placements of the four spaces plus the walkable regions
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    pub room_a: Placement,
    pub room_b: Placement,
    pub corridor: Placement,
    pub living_room: Placement,
    /// Walkable regions, already shrunk by the wall margin
    pub regions: Vec<Region>,
}

impl FloorPlan {
    pub fn new(layout: &LayoutConfig, wall_margin: f32) -> Self {
        let room = layout.room_size;
        let half_corridor = layout.corridor_width / 2.0;
        let offset = room + half_corridor;

        // Walkable footprints (room A, room B, corridor) before the margin
        let nominal = [
            Region::new(-offset, -half_corridor, -room / 2.0, room / 2.0),
            Region::new(half_corridor, offset, -room / 2.0, room / 2.0),
            Region::new(-half_corridor, half_corridor, -offset, offset),
        ];

        Self {
            room_a: Placement::new(-offset, 0.0, 0.0),
            room_b: Placement::new(offset, 0.0, PI),
            corridor: Placement::new(0.0, 0.0, 0.0),
            living_room: Placement::new(0.0, -offset, FRAC_PI_2),
            regions: nominal.iter().map(|r| r.shrink(wall_margin)).collect(),
        }
    }

    pub fn room_a_region(&self) -> Region {
        self.regions[0]
    }

    pub fn room_b_region(&self) -> Region {
        self.regions[1]
    }

    pub fn corridor_region(&self) -> Region {
        self.regions[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plan() -> FloorPlan {
        FloorPlan::new(&LayoutConfig::default(), 0.5)
    }

    #[test]
    fn test_default_placements() {
        let plan = plan();
        assert_eq!(plan.room_a, Placement::new(-12.0, 0.0, 0.0));
        assert_eq!(plan.room_b, Placement::new(12.0, 0.0, PI));
        assert_eq!(plan.corridor, Placement::new(0.0, 0.0, 0.0));
        assert_eq!(plan.living_room, Placement::new(0.0, -12.0, FRAC_PI_2));
    }

    #[test]
    fn test_regions_are_shrunk_by_margin() {
        let plan = plan();
        assert_eq!(plan.room_a_region(), Region::new(-11.5, -2.5, -4.5, 4.5));
        assert_eq!(plan.room_b_region(), Region::new(2.5, 11.5, -4.5, 4.5));
        assert_eq!(plan.corridor_region(), Region::new(-1.5, 1.5, -11.5, 11.5));
    }

    #[test]
    fn test_region_follows_layout_changes() {
        let layout = LayoutConfig { room_size: 8.0, corridor_width: 2.0, ..Default::default() };
        let plan = FloorPlan::new(&layout, 0.25);
        let corridor = plan.corridor_region();
        assert_relative_eq!(corridor.width(), 1.5);
        assert_relative_eq!(corridor.depth(), 17.5);
        assert_eq!(plan.room_b.x, 9.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let region = Region::new(-1.0, 1.0, -2.0, 2.0);
        assert!(region.contains(-1.0, 0.0));
        assert!(region.contains(1.0, 2.0));
        assert!(!region.contains(1.0001, 0.0));
        assert!(!region.contains(0.0, -2.0001));
    }
}
