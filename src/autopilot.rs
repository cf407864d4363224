//! Demo autopilot
//!
//! Picks a move each frame to sidestep the nearest obstacle that is about to
//! reach the player. Used by the headless runner's `--autopilot` mode.

use std::cmp::Ordering;

use crate::sim::{Command, GameState};

/// How many update ticks ahead an obstacle counts as a threat
pub const LOOKAHEAD_TICKS: f32 = 12.0;

/// Choose a dodge move, or `None` to stay put
pub fn choose(state: &GameState) -> Option<Command> {
    if state.is_game_over() {
        return None;
    }

    let config = &state.config;
    let player = &state.player;
    let size = config.obstacle_size;

    // Player span widened by one step so we react before it's too late
    let left = player.x - config.step_size;
    let right = player.x + player.size + config.step_size;
    let player_bottom = player.y + player.size;
    let horizon = player.y - config.fall_speed * LOOKAHEAD_TICKS;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.pos.y < player_bottom && o.pos.y + size > horizon)
        .filter(|o| o.pos.x < right && o.pos.x + size > left)
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))?;

    let fits_left = threat.pos.x >= player.size;
    let fits_right = config.screen_width - (threat.pos.x + size) >= player.size;

    let go_left = match (fits_left, fits_right) {
        (true, false) => true,
        (false, true) => false,
        _ => {
            // Dodge toward whichever side of the obstacle we're already on
            let player_center = player.x + player.size / 2.0;
            let obstacle_center = threat.pos.x + size / 2.0;
            player_center < obstacle_center
        }
    };

    if go_left && player.x > 0.0 {
        Some(Command::MoveLeft)
    } else if !go_left && player.x < config.player_max_x() {
        Some(Command::MoveRight)
    } else {
        None
    }
}
