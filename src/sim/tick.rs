//! Fixed-rate simulation steps
//!
//! Spawn and update ticks plus player input. Each call is one atomic state
//! transition; collisions are re-evaluated at the end of every mutation.

use glam::Vec2;
use rand::Rng;

use super::collision::first_collision;
use super::state::{GameEvent, GameState, GameStatus, Obstacle};

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Restart the run
    Reset,
}

/// Apply one input command
pub fn apply(state: &mut GameState, command: Command) {
    match command {
        Command::MoveLeft => move_left(state),
        Command::MoveRight => move_right(state),
        Command::Reset => reset(state),
    }
}

/// Spawn tick: drop a new obstacle just above the top edge
///
/// Returns the new obstacle's ID, or `None` when the game is over.
pub fn spawn_obstacle(state: &mut GameState) -> Option<u32> {
    if state.is_game_over() {
        return None;
    }

    let size = state.config.obstacle_size;
    // Config validation guarantees a non-empty range
    let x = state.rng.random_range(0.0..state.config.obstacle_max_x());
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, -size),
    });
    state.push_event(GameEvent::ObstacleSpawned { id, x });
    log::debug!("Spawned obstacle {} at x={:.1}", id, x);

    Some(id)
}

/// Update tick: move every obstacle down, prune the ones off-screen, then check for a hit
pub fn advance(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;

    let fall_speed = state.config.fall_speed;
    let screen_height = state.config.screen_height;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += fall_speed;
    }

    let mut despawned = Vec::new();
    state.obstacles.retain(|o| {
        let on_screen = o.pos.y < screen_height;
        if !on_screen {
            despawned.push(o.id);
        }
        on_screen
    });
    if !despawned.is_empty() {
        log::debug!("Pruned {} obstacle(s) at tick {}", despawned.len(), state.time_ticks);
    }
    for id in despawned {
        state.push_event(GameEvent::ObstacleDespawned { id });
    }

    check_collision(state);
}

/// Step the player left, stopping at the screen edge
pub fn move_left(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }
    state.player.x = (state.player.x - state.config.step_size).max(0.0);
    check_collision(state);
}

/// Step the player right, stopping at the screen edge
pub fn move_right(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }
    state.player.x = (state.player.x + state.config.step_size).min(state.config.player_max_x());
    check_collision(state);
}

/// Clear the field, re-center the player and resume play
pub fn reset(state: &mut GameState) {
    state.obstacles.clear();
    state.player.x = state.config.player_start_x();
    state.status = GameStatus::Playing;
    state.push_event(GameEvent::Reset);
    log::info!("Game reset");
}

/// Move to `GameOver` if any obstacle overlaps the player
///
/// Returns whether the game is over after the check.
pub fn check_collision(state: &mut GameState) -> bool {
    if state.is_game_over() {
        return true;
    }

    if let Some(obstacle_id) =
        first_collision(&state.player, &state.obstacles, state.config.obstacle_size)
    {
        state.status = GameStatus::GameOver;
        state.push_event(GameEvent::Collision { obstacle_id });
        log::info!(
            "Game over: obstacle {} hit the player after {} ticks",
            obstacle_id,
            state.time_ticks
        );
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(GameConfig::with_screen(320.0, 600.0), seed).unwrap()
    }

    #[test]
    fn test_collision_scenario() {
        let mut state = new_state(1);
        assert_eq!(state.player.x, 140.0);
        let id = state.insert_obstacle_at(150.0, 460.0);

        assert!(check_collision(&mut state));
        assert_eq!(state.status, GameStatus::GameOver);
        assert!(state.drain_events().contains(&GameEvent::Collision { obstacle_id: id }));
    }

    #[test]
    fn test_non_collision_scenario() {
        let mut state = new_state(1);
        state.insert_obstacle_at(250.0, 460.0);

        assert!(!check_collision(&mut state));
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_spawn_starts_above_screen() {
        let mut state = new_state(7);
        let id = spawn_obstacle(&mut state).unwrap();
        let obstacle = state.obstacles[0];
        assert_eq!(obstacle.id, id);
        assert_eq!(obstacle.pos.y, -50.0);
        assert!(obstacle.pos.x >= 0.0 && obstacle.pos.x < 270.0);
    }

    #[test]
    fn test_advance_moves_by_fall_speed() {
        let mut state = new_state(1);
        state.insert_obstacle_at(0.0, -50.0);
        state.insert_obstacle_at(270.0, 100.0);

        advance(&mut state);
        assert_eq!(state.obstacles[0].pos.y, -40.0);
        assert_eq!(state.obstacles[1].pos.y, 110.0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_advance_prunes_and_keeps_order() {
        let mut state = new_state(1);
        let a = state.insert_obstacle_at(0.0, 100.0);
        let gone = state.insert_obstacle_at(270.0, 590.0);
        let b = state.insert_obstacle_at(270.0, 0.0);

        advance(&mut state);
        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(state.drain_events().contains(&GameEvent::ObstacleDespawned { id: gone }));
    }

    #[test]
    fn test_obstacle_falls_into_player() {
        let mut state = new_state(1);
        // Bottom edge at 450 touches the player's top edge without overlapping
        state.insert_obstacle_at(140.0, 400.0);
        assert!(!check_collision(&mut state));

        advance(&mut state);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_game_over_freezes_obstacles() {
        let mut state = new_state(1);
        state.insert_obstacle_at(150.0, 460.0);
        state.insert_obstacle_at(10.0, 10.0);
        advance(&mut state);
        assert!(state.is_game_over());

        let frozen = state.obstacles.clone();
        let ticks = state.time_ticks;
        for _ in 0..10 {
            advance(&mut state);
            assert_eq!(spawn_obstacle(&mut state), None);
        }
        assert_eq!(state.obstacles, frozen);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_moves_ignored_after_game_over() {
        let mut state = new_state(1);
        state.insert_obstacle_at(150.0, 460.0);
        check_collision(&mut state);

        move_left(&mut state);
        move_right(&mut state);
        assert_eq!(state.player.x, 140.0);
    }

    #[test]
    fn test_moving_into_obstacle_ends_game() {
        let mut state = new_state(1);
        // Just right of the player, no overlap yet
        state.insert_obstacle_at(180.0, 460.0);
        assert!(!check_collision(&mut state));

        move_right(&mut state);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_moves_clamp_to_edges() {
        let mut state = new_state(1);
        for _ in 0..20 {
            move_left(&mut state);
        }
        assert_eq!(state.player.x, 0.0);
        for _ in 0..20 {
            move_right(&mut state);
        }
        assert_eq!(state.player.x, 280.0);
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let mut state = new_state(1);
        spawn_obstacle(&mut state);
        move_left(&mut state);
        state.insert_obstacle_at(100.0, 460.0);
        check_collision(&mut state);
        assert!(state.is_game_over());

        reset(&mut state);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.x, 140.0);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_reset_twice_matches_once() {
        let mut once = new_state(3);
        let mut twice = new_state(3);
        for state in [&mut once, &mut twice] {
            spawn_obstacle(state);
            move_right(state);
        }

        apply(&mut once, Command::Reset);
        apply(&mut twice, Command::Reset);
        apply(&mut twice, Command::Reset);
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        for i in 0..200 {
            for state in [&mut state1, &mut state2] {
                if i % 23 == 0 {
                    spawn_obstacle(state);
                }
                if i % 5 == 0 {
                    apply(state, Command::MoveLeft);
                }
                advance(state);
            }
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    #[test]
    fn test_different_seeds_spawn_differently() {
        let mut state1 = new_state(1);
        let mut state2 = new_state(2);
        for _ in 0..4 {
            spawn_obstacle(&mut state1);
            spawn_obstacle(&mut state2);
        }
        assert_ne!(state1.obstacles, state2.obstacles);
    }

    fn command_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![Just(Command::MoveLeft), Just(Command::MoveRight)]
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            commands in prop::collection::vec(command_strategy(), 0..200),
        ) {
            let mut state = new_state(1);
            for command in commands {
                apply(&mut state, command);
                prop_assert!(state.player.x >= 0.0);
                prop_assert!(state.player.x <= state.config.player_max_x());
            }
        }

        #[test]
        fn prop_spawns_within_range(seed in any::<u64>(), count in 1usize..64) {
            let mut state = new_state(seed);
            for _ in 0..count {
                spawn_obstacle(&mut state);
            }
            for obstacle in &state.obstacles {
                prop_assert!(obstacle.pos.x >= 0.0);
                prop_assert!(obstacle.pos.x < state.config.obstacle_max_x());
            }
        }

        #[test]
        fn prop_advance_prunes_everything_off_screen(
            ys in prop::collection::vec(-50.0f32..700.0, 0..32),
        ) {
            let mut state = new_state(1);
            // Far left of the player so nothing collides
            for y in ys {
                state.insert_obstacle_at(0.0, y);
            }
            advance(&mut state);
            for obstacle in &state.obstacles {
                prop_assert!(obstacle.pos.y < state.config.screen_height);
            }
        }
    }
}
