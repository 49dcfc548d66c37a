//! Mouse look
//!
//! Yaw and pitch accumulate from raw pointer deltas while the pointer is
//! captured. The camera orientation is rebuilt from them every tick.

use std::f32::consts::FRAC_PI_2;
use macroquad::math::{EulerRot, Quat, Vec2, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookState {
    /// Rotation about +Y (radians); 0 faces -Z
    pub yaw: f32,
    /// Rotation about the camera's X axis, clamped to [-π/2, π/2]
    pub pitch: f32,
}

impl LookState {
    /// Apply one pointer delta (pixels). Moving right turns right, moving
    /// down looks down.
    pub fn apply_pointer_delta(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Yaw first, then pitch; no roll
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }
}
