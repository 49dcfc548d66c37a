//! First-person perspective camera
//!
//! Wraps macroquad's `Camera3D` with a mutable field of view (mouse wheel)
//! and an orientation set from the look angles.

use macroquad::camera::{Camera3D, Projection};
use macroquad::logging::info;
use macroquad::math::{Quat, Vec2, Vec3};
use crate::world::CameraSettings;

#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub orientation: Quat,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    settings: CameraSettings,
    screen_size: Vec2,
}

impl FirstPersonCamera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov: settings.fov,
            aspect: 1.0,
            settings,
            screen_size: Vec2::ZERO,
        }
    }

    /// Wheel up narrows the view, wheel down widens it
    pub fn apply_wheel(&mut self, wheel: f32) {
        if wheel == 0.0 {
            return;
        }
        let fov = self.fov - wheel * self.settings.fov_per_wheel_unit;
        self.fov = fov.clamp(self.settings.min_fov, self.settings.max_fov);
    }

    /// Recompute the aspect ratio when the output surface changes size.
    /// Returns true if the size actually changed.
    pub fn resize(&mut self, screen_size: Vec2) -> bool {
        if screen_size == self.screen_size || screen_size.x <= 0.0 || screen_size.y <= 0.0 {
            return false;
        }
        self.screen_size = screen_size;
        self.aspect = screen_size.x / screen_size.y;
        info!("Window resized: {} x {}", screen_size.x, screen_size.y);
        true
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position,
            target: self.position + self.forward(),
            up: self.orientation * Vec3::Y,
            fovy: self.fov.to_radians(),
            aspect: Some(self.aspect),
            projection: Projection::Perspective,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> FirstPersonCamera {
        FirstPersonCamera::new(CameraSettings::default())
    }

    #[test]
    fn test_wheel_clamps_fov() {
        let mut cam = camera();
        cam.apply_wheel(-100.0);
        assert_eq!(cam.fov, 90.0);
        cam.apply_wheel(100.0);
        assert_eq!(cam.fov, 60.0);
    }

    #[test]
    fn test_wheel_steps_within_range() {
        let mut cam = camera();
        cam.apply_wheel(1.0);
        assert_eq!(cam.fov, 70.0);
        cam.apply_wheel(-2.0);
        assert_eq!(cam.fov, 80.0);
    }

    #[test]
    fn test_resize_updates_aspect_once() {
        let mut cam = camera();
        assert!(cam.resize(Vec2::new(1600.0, 800.0)));
        assert_eq!(cam.aspect, 2.0);
        assert!(!cam.resize(Vec2::new(1600.0, 800.0)));
        assert!(!cam.resize(Vec2::new(0.0, 800.0)));
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn test_camera3d_looks_forward() {
        let mut cam = camera();
        cam.position = Vec3::new(1.0, 1.2, 3.0);
        let cam3d = cam.to_camera3d();
        assert_eq!(cam3d.target, Vec3::new(1.0, 1.2, 2.0));
        assert_eq!(cam3d.up, Vec3::Y);
    }
}
