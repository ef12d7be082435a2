//! Aquarium - an arcade fish-eat-fish simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (creatures, collisions, levels, scene tick)
//! - `renderer`: Drawing collaborator contract, sprite templates and HUD
//! - `audio`: Ambient sound collaborator contract
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::AquariumError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default world dimensions
    pub const WORLD_WIDTH: u32 = 1024;
    pub const WORLD_HEIGHT: u32 = 768;
    /// Creatures added to the world bounce inside (width - margin, height - margin)
    pub const SPRITE_MARGIN: f32 = 20.0;

    /// Scene throttle: heavy step runs once every N frames
    pub const THROTTLE_FRAMES: u32 = 5;
    /// Damage debounce after a hit (3 seconds at 60 fps)
    pub const DAMAGE_DEBOUNCE_FRAMES: u32 = 3 * 60;
    /// Flash window after a hit or a pickup
    pub const FLASH_FRAMES: u32 = 30;
    /// Every multiple of this score grants +1 power
    pub const POWER_UP_SCORE_STEP: i32 = 25;

    /// Player defaults
    pub const PLAYER_LIVES: i32 = 3;
    pub const PLAYER_POWER: i32 = 1;
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_START_SPEED: f32 = 5.0;
    /// Growth per power increase
    pub const POWER_RADIUS_GROWTH: f32 = 3.0;
    pub const POWER_SPEED_GROWTH: f32 = 1.0;

    /// Spawned fish speed range (inclusive)
    pub const SPAWN_SPEED_MIN: u32 = 1;
    pub const SPAWN_SPEED_MAX: u32 = 25;

    /// Power-ups
    pub const POWER_UP_RADIUS: f32 = 20.0;
    pub const POWER_UP_DRIFT: f32 = 1.0;
}

/// Unit vector for (dx, dy), or zero when the input has no length
#[inline]
pub fn unit_direction(dx: f32, dy: f32) -> Vec2 {
    Vec2::new(dx, dy).normalize_or_zero()
}
