//! Game configuration
//!
//! Screen dimensions, entity sizes and tick rates are passed explicitly at
//! construction. Loaded from JSON; missing fields fall back to defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating a [`GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io(std::io::Error),
    /// The config document is not valid JSON for this schema
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Entities ===
    /// Side length of the player square
    pub player_size: f32,
    /// Side length of an obstacle square
    pub obstacle_size: f32,
    /// Horizontal distance covered by one move input
    pub step_size: f32,
    /// Vertical distance an obstacle falls per update tick
    pub fall_speed: f32,
    /// Distance from the bottom of the screen to the player's top edge
    pub player_bottom_offset: f32,

    // === Timing ===
    pub spawn_interval_ms: u64,
    pub update_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,

            player_size: PLAYER_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            step_size: STEP_SIZE,
            fall_speed: FALL_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            update_interval_ms: UPDATE_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Default config sized to the given screen
    pub fn with_screen(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break the bounds invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_size", self.player_size),
            ("obstacle_size", self.obstacle_size),
            ("step_size", self.step_size),
            ("fall_speed", self.fall_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be a positive number, got {}", value)));
            }
        }

        if !self.player_bottom_offset.is_finite() || self.player_bottom_offset < 0.0 {
            return Err(invalid(
                "player_bottom_offset",
                format!("must be a non-negative number, got {}", self.player_bottom_offset),
            ));
        }
        // Spawn range [0, width - obstacle) must be non-empty
        if self.screen_width <= self.obstacle_size {
            return Err(invalid(
                "screen_width",
                format!("must exceed obstacle_size ({})", self.obstacle_size),
            ));
        }
        if self.screen_width < self.player_size {
            return Err(invalid(
                "screen_width",
                format!("must be at least player_size ({})", self.player_size),
            ));
        }
        if self.screen_height < self.player_bottom_offset {
            return Err(invalid(
                "screen_height",
                format!("must be at least player_bottom_offset ({})", self.player_bottom_offset),
            ));
        }
        if self.spawn_interval_ms == 0 {
            return Err(invalid("spawn_interval_ms", "must be non-zero".to_string()));
        }
        if self.update_interval_ms == 0 {
            return Err(invalid("update_interval_ms", "must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Fixed vertical position of the player's top edge
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.screen_height - self.player_bottom_offset
    }

    /// Horizontally centered player position
    #[inline]
    pub fn player_start_x(&self) -> f32 {
        self.screen_width / 2.0 - self.player_size / 2.0
    }

    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.screen_width - self.player_size
    }

    /// Exclusive upper bound of an obstacle's spawn position
    #[inline]
    pub fn obstacle_max_x(&self) -> f32 {
        self.screen_width - self.obstacle_size
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
