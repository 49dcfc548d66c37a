//! Roomwalk: a first-person walkthrough of a small furnished floor plan
//!
//! Two rooms joined by a corridor, plus a larger living room, walked with
//! the arrow keys and a captured mouse. Movement is clamped to the walkable
//! regions derived from the same layout that builds the walls.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod game;
mod input;
mod world;

use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use app::AppState;
use world::{ConfigError, WalkthroughConfig, CONFIG_PATH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Roomwalk v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        sample_count: 4,
        ..Default::default()
    }
}

/// Load the walkthrough configuration, falling back to the built-in layout
async fn load_config() -> WalkthroughConfig {
    match WalkthroughConfig::load(CONFIG_PATH).await {
        Ok(config) => {
            info!("Loaded configuration from {}", CONFIG_PATH);
            config
        }
        Err(ConfigError::Read { path, message }) => {
            info!("No configuration at {} ({}), using defaults", path, message);
            let config = WalkthroughConfig::default();
            // Leave an editable copy behind on desktop
            #[cfg(not(target_arch = "wasm32"))]
            match config.save(&path) {
                Ok(()) => info!("Wrote default configuration to {}", path),
                Err(e) => warn!("{}", e),
            }
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {}", CONFIG_PATH, e);
            WalkthroughConfig::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = load_config().await;
    let mut app = AppState::new(&config);

    info!("Roomwalk v{} ready", VERSION);

    loop {
        app.frame();
        next_frame().await;
    }
}
