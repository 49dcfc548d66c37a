//! Collision System
//!
//! The player is a point on the XZ plane that must stay inside the union of
//! a few axis-aligned walkable regions. A candidate position outside every
//! region is simply refused; there is no push-back or sliding.

use macroquad::math::Vec3;
use crate::world::{FloorPlan, Region};

/// Static set of walkable regions
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn from_floor_plan(plan: &FloorPlan) -> Self {
        Self::new(plan.regions.clone())
    }

    /// True iff the candidate's (x, z) lies inside at least one region
    pub fn is_allowed(&self, candidate: Vec3) -> bool {
        self.regions.iter().any(|r| r.contains(candidate.x, candidate.z))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}
