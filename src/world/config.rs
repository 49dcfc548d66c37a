//! Walkthrough configuration
//!
//! Every tunable constant of the walkthrough lives in one RON document.
//! Layout geometry and collision regions are both derived from the same
//! [`LayoutConfig`], so the two can never drift apart.
//!
//! Missing sections (or missing fields inside a section) fall back to the
//! defaults below, which give the standard two-room layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::floor_plan::FloorPlan;

/// Default location of the configuration file (relative to the asset root)
pub const CONFIG_PATH: &str = "assets/config/walkthrough.ron";

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Footprint and wall dimensions shared by every room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length of a regular room (also the corridor length)
    pub room_size: f32,
    /// Width of the connecting corridor
    pub corridor_width: f32,
    /// Living room side length as a multiple of `room_size`
    pub living_room_scale: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub floor_thickness: f32,
    /// Side length of the square wall notes
    pub note_size: f32,
    /// Distance of each note from the two walls of its corner
    pub note_inset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            room_size: 10.0,
            corridor_width: 4.0,
            living_room_scale: 2.0,
            wall_height: 4.0,
            wall_thickness: 0.2,
            floor_thickness: 0.1,
            note_size: 1.0,
            note_inset: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn living_room_size(&self) -> f32 {
        self.room_size * self.living_room_scale
    }
}

/// Movement tuning. All rates are per tick, not per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Resting eye height (camera Y while grounded)
    pub eye_height: f32,
    /// Horizontal distance covered per tick
    pub speed: f32,
    /// Upward velocity applied on take-off
    pub jump_speed: f32,
    /// Velocity lost per airborne tick
    pub gravity: f32,
    /// Distance kept between the player and the nominal region edges
    pub wall_margin: f32,
    /// Spawn point on the XZ plane
    pub spawn: [f32; 2],
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            eye_height: 1.2,
            speed: 0.1,
            jump_speed: 0.1,
            gravity: 0.01,
            wall_margin: 0.5,
            spawn: [0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookSettings {
    /// Radians per pixel of pointer motion
    pub sensitivity: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self { sensitivity: 0.002 }
    }
}

/// Perspective camera settings (angles in degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    /// FOV change per unit of wheel scroll (scrolling up narrows the view)
    pub fov_per_wheel_unit: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 75.0,
            min_fov: 60.0,
            max_fov: 90.0,
            fov_per_wheel_unit: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    pub ambient: f32,
    pub directional: f32,
    /// Position of the directional light; it shines towards the origin
    pub direction: [f32; 3],
    /// Background colour as 0xRRGGBB
    pub clear_color: u32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient: 0.8,
            directional: 0.3,
            direction: [5.0, 5.0, 5.0],
            clear_color: 0x1a1a1a,
        }
    }
}

/// Surface colours as 0xRRGGBB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub wall: u32,
    pub floor: u32,
    pub note: u32,
    pub edge: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: 0xffffff,
            floor: 0x333333,
            note: 0xffff00,
            edge: 0x000000,
        }
    }
}

/// A free-standing plane with word-wrapped text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPanelConfig {
    pub text: String,
    pub position: [f32; 3],
    pub rotation_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for TextPanelConfig {
    fn default() -> Self {
        Self {
            text: "This is a sample note on a 3D panel. It is drawn with a \
                   translucent background and white text."
                .to_string(),
            position: [0.0, 0.0, -4.9],
            rotation_y: 0.0,
            width: 2.0,
            height: 1.0,
        }
    }
}

/// Complete walkthrough configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    pub layout: LayoutConfig,
    pub player: PlayerSettings,
    pub look: LookSettings,
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub palette: Palette,
    pub panels: Vec<TextPanelConfig>,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            player: PlayerSettings::default(),
            look: LookSettings::default(),
            camera: CameraSettings::default(),
            lighting: LightingSettings::default(),
            palette: Palette::default(),
            panels: vec![TextPanelConfig::default()],
        }
    }
}

impl WalkthroughConfig {
    /// Parse and validate a RON document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: WalkthroughConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load from a file (native) or fetch it relative to the page (WASM)
    pub async fn load(path: &str) -> Result<Self, ConfigError> {
        let source = macroquad::file::load_string(path)
            .await
            .map_err(|e| ConfigError::Read {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Self::from_ron_str(&source)
    }

    /// Write this configuration as a pretty RON document, creating parent
    /// directories as needed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let write_err = |e: std::io::Error| ConfigError::Write {
            path: path.to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, self.to_ron_string()?).map_err(write_err)
    }

    /// Reject values that would leave the walkthrough unplayable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let player = &self.player;
        let camera = &self.camera;

        let positive = [
            ("layout.room_size", layout.room_size),
            ("layout.corridor_width", layout.corridor_width),
            ("layout.living_room_scale", layout.living_room_scale),
            ("layout.wall_height", layout.wall_height),
            ("player.eye_height", player.eye_height),
            ("player.speed", player.speed),
            ("player.jump_speed", player.jump_speed),
            ("player.gravity", player.gravity),
            ("look.sensitivity", self.look.sensitivity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        let finite = [
            ("layout.wall_thickness", layout.wall_thickness),
            ("layout.floor_thickness", layout.floor_thickness),
            ("layout.note_size", layout.note_size),
            ("layout.note_inset", layout.note_inset),
            ("player.spawn[0]", player.spawn[0]),
            ("player.spawn[1]", player.spawn[1]),
            ("camera.fov", camera.fov),
            ("camera.fov_per_wheel_unit", camera.fov_per_wheel_unit),
            ("lighting.ambient", self.lighting.ambient),
            ("lighting.directional", self.lighting.directional),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
            }
        }
        if camera.fov_per_wheel_unit < 0.0 {
            return Err(ConfigError::Invalid("camera.fov_per_wheel_unit must not be negative".to_string()));
        }

        if !(player.wall_margin >= 0.0) {
            return Err(ConfigError::Invalid("player.wall_margin must not be negative".to_string()));
        }
        let narrowest = layout.corridor_width.min(layout.room_size);
        if player.wall_margin * 2.0 >= narrowest {
            return Err(ConfigError::Invalid(format!(
                "player.wall_margin {} leaves no walkable space in a {} wide region",
                player.wall_margin, narrowest
            )));
        }

        if !(camera.min_fov > 0.0 && camera.max_fov < 180.0 && camera.min_fov <= camera.max_fov) {
            return Err(ConfigError::Invalid(format!(
                "camera FOV range {}..{} is not within (0, 180)",
                camera.min_fov, camera.max_fov
            )));
        }
        if camera.fov < camera.min_fov || camera.fov > camera.max_fov {
            return Err(ConfigError::Invalid(format!(
                "camera.fov {} outside {}..{}",
                camera.fov, camera.min_fov, camera.max_fov
            )));
        }

        // The player must start somewhere it is allowed to stand
        let [x, z] = player.spawn;
        let plan = FloorPlan::new(layout, player.wall_margin);
        if !plan.regions.iter().any(|r| r.contains(x, z)) {
            return Err(ConfigError::Invalid(format!(
                "player.spawn ({}, {}) is outside every walkable region",
                x, z
            )));
        }
        Ok(())
    }
}
