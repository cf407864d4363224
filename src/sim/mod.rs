//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (no frame-time scaling)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, timer or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_collision, obstacle_box, player_box};
pub use state::{GameEvent, GameState, GameStatus, Obstacle, ObstacleView, Player, Snapshot};
pub use tick::{
    Command, advance, apply, check_collision, move_left, move_right, reset, spawn_obstacle,
};
