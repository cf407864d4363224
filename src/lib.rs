//! Cloud Dodge - A single-screen arcade avoider
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, collisions, game state)
//! - `config`: Screen dimensions, entity sizes and tick rates
//! - `session`: Host-driven scheduler owning the spawn and update ticks
//! - `autopilot`: Demo driver that dodges on its own
//! - `platform`: Browser bindings for a JavaScript renderer

pub mod autopilot;
pub mod config;
pub mod platform;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use session::{PumpReport, Session};

/// Game configuration defaults
pub mod consts {
    /// Default screen dimensions
    pub const DEFAULT_SCREEN_WIDTH: f32 = 320.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;

    /// Player square side length
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player top edge sits this far above the bottom of the screen
    pub const PLAYER_BOTTOM_OFFSET: f32 = 150.0;
    /// Horizontal distance per move input
    pub const STEP_SIZE: f32 = 20.0;

    /// Obstacle square side length
    pub const OBSTACLE_SIZE: f32 = 50.0;
    /// Vertical distance an obstacle falls per update tick
    pub const FALL_SPEED: f32 = 10.0;

    /// Tick rates
    pub const SPAWN_INTERVAL_MS: u64 = 700;
    pub const UPDATE_INTERVAL_MS: u64 = 30;

    /// Longest stretch of elapsed time a single pump will simulate
    pub const MAX_CATCH_UP_MS: u64 = 250;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_QUEUED_EVENTS: usize = 256;
}
