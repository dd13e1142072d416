//! Headless driver for native builds
//!
//! Steps a session at a fixed frame rate with a simple autopilot standing in
//! for the player. Used by the native binary as a smoke run.

use crate::sim::{GameEvent, GameState, Intent, LaneIndex};
use crate::{Tuning, TuningError};

/// Distance ahead of the ship the autopilot treats as dangerous. A lane
/// change takes roughly 90 units of obstacle travel at any difficulty.
const LOOKAHEAD: f32 = 100.0;
/// Lateral distance from a lane center that counts as "in the lane"
const LANE_HALF_WIDTH: f32 = 1.0;

/// Pick the intent a cautious player would issue this frame
pub fn autopilot_intent(state: &GameState) -> Option<Intent> {
    if state.is_game_over() {
        return Some(Intent::Restart);
    }

    let current = state.player.target_lane;
    if !lane_threatened(state, current) {
        return None;
    }

    // Try the side toward the center first
    let order: [i64; 2] = if current < LaneIndex::CENTER { [1, -1] } else { [-1, 1] };
    order.into_iter().find_map(|delta| {
        let lane = current.shifted(delta);
        if lane == current || lane_threatened(state, lane) {
            return None;
        }
        Some(if delta < 0 { Intent::MoveLeft } else { Intent::MoveRight })
    })
}

fn lane_threatened(state: &GameState, lane: LaneIndex) -> bool {
    let x = state.tuning().lanes.coordinate(lane);
    let z = state.player.pos.z;
    state.pool.iter_active().any(|o| {
        (o.pos.x - x).abs() < LANE_HALF_WIDTH && o.pos.z < z + 1.5 && o.pos.z > z - LOOKAHEAD
    })
}

/// Fixed-rate session with an autopilot
pub struct HeadlessSession {
    pub state: GameState,
    frame_ms: f32,
    now_ms: f64,
    /// Frames stepped so far
    pub frames: u64,
    /// Runs that ended in a collision
    pub crashes: u32,
}

impl HeadlessSession {
    pub fn new(seed: u64, tuning: Tuning, frame_ms: f32) -> Result<Self, TuningError> {
        Ok(Self {
            state: GameState::with_tuning(seed, tuning)?,
            frame_ms,
            now_ms: 0.0,
            frames: 0,
            crashes: 0,
        })
    }

    /// One frame: autopilot input, then the simulation
    pub fn step(&mut self) {
        if let Some(intent) = autopilot_intent(&self.state) {
            self.state.handle_intent(intent);
        }

        self.state.frame(self.now_ms);
        self.now_ms += self.frame_ms as f64;
        self.frames += 1;

        for event in self.state.drain_events() {
            match event {
                GameEvent::Collision { id } => {
                    self.crashes += 1;
                    log::info!(
                        "Run {} ended on obstacle {} after {} frames",
                        self.crashes,
                        id.index(),
                        self.frames
                    );
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_Z;
    use crate::sim::ObstacleId;

    fn place_obstacle(state: &mut GameState, lane: LaneIndex, z: f32) -> ObstacleId {
        let x = state.tuning().lanes.coordinate(lane);
        let id = state.pool.acquire().unwrap();
        let obstacle = state.pool.get_mut(id).unwrap();
        obstacle.pos.x = x;
        obstacle.pos.z = z;
        obstacle.prev_z = z;
        id
    }

    #[test]
    fn test_autopilot_idle_on_clear_track() {
        let state = GameState::new(1);
        assert_eq!(autopilot_intent(&state), None);
    }

    #[test]
    fn test_autopilot_dodges() {
        let mut state = GameState::new(1);
        place_obstacle(&mut state, LaneIndex::CENTER, PLAYER_Z - 30.0);
        assert_eq!(autopilot_intent(&state), Some(Intent::MoveLeft));

        // Left blocked too
        place_obstacle(&mut state, LaneIndex::LEFT, PLAYER_Z - 20.0);
        assert_eq!(autopilot_intent(&state), Some(Intent::MoveRight));

        // Nowhere to go
        place_obstacle(&mut state, LaneIndex::RIGHT, PLAYER_Z - 10.0);
        assert_eq!(autopilot_intent(&state), None);
    }

    #[test]
    fn test_autopilot_heads_back_to_center() {
        let mut state = GameState::new(1);
        state.handle_intent(Intent::MoveRight);
        place_obstacle(&mut state, LaneIndex::RIGHT, PLAYER_Z - 5.0);
        assert_eq!(autopilot_intent(&state), Some(Intent::MoveLeft));
    }

    #[test]
    fn test_autopilot_restarts() {
        let mut state = GameState::new(1);
        let id = place_obstacle(&mut state, LaneIndex::CENTER, PLAYER_Z);
        state.end_run(id);
        assert_eq!(autopilot_intent(&state), Some(Intent::Restart));
    }

    #[test]
    fn test_session_runs() {
        let mut session = HeadlessSession::new(42, Tuning::default(), 1000.0 / 60.0).unwrap();
        session.run(60 * 20);
        assert_eq!(session.frames, 1200);
        assert!(session.state.pool.is_consistent());
        if session.crashes > 0 {
            // Nothing can spawn before 1.1 s, so any crash scores something
            assert!(session.state.best_score() > 0);
        }
    }
}
