//! Game state and core simulation types
//!
//! Everything the renderer reads each frame lives here.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::consts::MAX_QUEUED_EVENTS;

/// Current status of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Obstacles falling, input accepted
    #[default]
    Playing,
    /// Player was hit; only reset leaves this state
    GameOver,
}

/// Something that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, x: f32 },
    /// Obstacle fell past the bottom of the screen
    ObstacleDespawned { id: u32 },
    Collision { obstacle_id: u32 },
    Reset,
}

/// The player's square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the whole run)
    pub y: f32,
    pub size: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_start_x(),
            y: config.player_y(),
            size: config.player_size,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_x: f32,
    pub player_y: f32,
    pub player_size: f32,
    pub obstacle_size: f32,
    /// Run seed, for reproducing a session
    pub seed: u64,
    pub obstacles: Vec<ObstacleView>,
    pub status: GameStatus,
    pub ticks: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub status: GameStatus,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Update ticks applied since creation
    pub time_ticks: u64,
    /// Undrained events, oldest first, capped at `MAX_QUEUED_EVENTS`
    events: VecDeque<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state, validating the config first
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: GameStatus::Playing,
            obstacles: Vec::new(),
            time_ticks: 0,
            events: VecDeque::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an obstacle at an explicit position (scripted setups and tests)
    pub fn insert_obstacle_at(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, y),
        });
        id
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Number of events waiting to be drained
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_x: self.player.x,
            player_y: self.player.y,
            player_size: self.player.size,
            obstacle_size: self.config.obstacle_size,
            seed: self.seed,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                })
                .collect(),
            status: self.status,
            ticks: self.time_ticks,
        }
    }
}
