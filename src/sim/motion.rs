//! Motion and difficulty integration
//!
//! All rates are scaled by the real frame delta so the game plays the same at
//! any refresh rate.

use super::lanes::Lanes;
use super::pool::ObstaclePool;
use super::state::Player;
use crate::Tuning;
use crate::consts::REFERENCE_FRAME_MS;

/// Linear difficulty ramp. No upper bound.
#[inline]
pub fn ramp_difficulty(difficulty: f32, dt_ms: f32, tuning: &Tuning) -> f32 {
    difficulty + tuning.speed_increment_per_ms * dt_ms
}

/// Ease the player toward its target lane.
///
/// The per-frame step grows with difficulty so lane changes keep up with the
/// track.
pub fn steer_player(player: &mut Player, lanes: &Lanes, difficulty: f32, dt_ms: f32, tuning: &Tuning) {
    let target_x = lanes.coordinate(player.target_lane);
    let max_step =
        tuning.lane_change_step * (difficulty / tuning.base_speed) * (dt_ms / REFERENCE_FRAME_MS);
    player.move_toward(target_x, max_step);
}

/// Move every active obstacle down the track and spin it
pub fn advance_obstacles(pool: &mut ObstaclePool, difficulty: f32, dt_ms: f32, tuning: &Tuning) {
    let distance = difficulty * (dt_ms / 1000.0) * tuning.forward_scale;
    let frames = dt_ms / REFERENCE_FRAME_MS;
    for obstacle in pool.iter_active_mut() {
        obstacle.advance(distance);
        obstacle.rotate(frames);
    }
}
