//! Collision detection between the player and falling obstacles
//!
//! Both entities are axis-aligned squares, so a box overlap test is exact.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap on both axes; boxes that only touch at an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

pub fn player_box(player: &Player) -> Aabb {
    Aabb::from_pos_size(player.pos(), Vec2::splat(player.size))
}

pub fn obstacle_box(obstacle: &Obstacle, obstacle_size: f32) -> Aabb {
    Aabb::from_pos_size(obstacle.pos, Vec2::splat(obstacle_size))
}

/// ID of the first obstacle (in spawn order) overlapping the player
pub fn first_collision(player: &Player, obstacles: &[Obstacle], obstacle_size: f32) -> Option<u32> {
    let player = player_box(player);
    obstacles
        .iter()
        .find(|o| player.overlaps(&obstacle_box(o, obstacle_size)))
        .map(|o| o.id)
}
