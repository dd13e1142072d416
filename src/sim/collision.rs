//! Player/obstacle overlap tests
//!
//! Both shapes are axis-aligned boxes. Rotation is cosmetic, so the player box
//! ignores lean and the obstacle box uses its circumradius on every axis.
//! Obstacles are swept along the forward axis over the distance they covered
//! this frame, which keeps a long frame from carrying one straight through
//! the player.

use glam::Vec3;

use super::pool::{Obstacle, ObstacleId, ObstaclePool};
use super::state::Player;
use crate::consts::{OBSTACLE_HALF_EXTENT, PLAYER_HALF_EXTENTS};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Closed-interval overlap: boxes that touch count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// Bounds of the player at its current position
pub fn player_bounds(player: &Player) -> Aabb {
    Aabb::from_center(player.pos, Vec3::from_array(PLAYER_HALF_EXTENTS))
}

/// Bounds of an obstacle swept from its previous to its current position
pub fn obstacle_bounds(obstacle: &Obstacle) -> Aabb {
    let half = Vec3::splat(OBSTACLE_HALF_EXTENT);
    let now = Aabb::from_center(obstacle.pos, half);
    let before = Aabb::from_center(
        Vec3::new(obstacle.pos.x, obstacle.pos.y, obstacle.prev_z),
        half,
    );
    now.union(&before)
}

/// First active obstacle overlapping the player, in slot order
pub fn first_hit(player: &Player, pool: &ObstaclePool) -> Option<ObstacleId> {
    let bounds = player_bounds(player);
    pool.iter_active()
        .find(|obstacle| bounds.intersects(&obstacle_bounds(obstacle)))
        .map(|obstacle| obstacle.id)
}
