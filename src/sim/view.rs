//! Read-only frame snapshot for the presentation layer

use glam::Vec3;
use serde::Serialize;

use super::pool::ObstacleId;
use super::state::{GamePhase, GameState};

/// Floats written per obstacle by [`write_obstacle_transforms`]:
/// visible flag, position xyz, rotation xyz
pub const TRANSFORM_STRIDE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub visible: bool,
    pub transform: Transform,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub difficulty: f32,
    pub player: Transform,
    pub lean: f32,
    pub obstacles: Vec<ObstacleView>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let obstacles = state
            .pool
            .iter()
            .map(|o| ObstacleView {
                id: o.id,
                visible: o.is_active(),
                transform: Transform {
                    position: o.pos,
                    rotation: o.rotation,
                },
            })
            .collect();

        Self {
            phase: state.phase,
            score: state.score(),
            best_score: state.best_score(),
            difficulty: state.difficulty(),
            player: Transform {
                position: state.player.pos,
                rotation: state.player.rotation(),
            },
            lean: state.player.lean,
            obstacles,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Flatten every slot's transform into `out` (cleared first), in slot order
pub fn write_obstacle_transforms(state: &GameState, out: &mut Vec<f32>) {
    out.clear();
    out.reserve(state.pool.capacity() * TRANSFORM_STRIDE);
    for o in state.pool.iter() {
        out.push(if o.is_active() { 1.0 } else { 0.0 });
        out.extend_from_slice(&o.pos.to_array());
        out.extend_from_slice(&o.rotation.to_array());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_lists_every_slot() {
        let mut state = GameState::new(4);
        let id = state.pool.acquire().unwrap();
        let view = FrameView::capture(&state);

        assert_eq!(view.phase, GamePhase::Running);
        assert_eq!(view.obstacles.len(), state.pool.capacity());
        assert!(view.obstacles[id.index()].visible);
        assert_eq!(view.obstacles.iter().filter(|o| o.visible).count(), 1);
        assert_eq!(view.player.position, state.player.pos);
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new(4);
        let json = FrameView::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Running");
        assert_eq!(value["score"], 0);
        assert_eq!(value["obstacles"].as_array().map(Vec::len), Some(12));
    }

    #[test]
    fn test_flat_transforms() {
        let mut state = GameState::new(4);
        let id = state.pool.acquire().unwrap();
        state.pool.get_mut(id).unwrap().pos.x = 2.5;

        let mut out = vec![99.0; 3];
        write_obstacle_transforms(&state, &mut out);
        assert_eq!(out.len(), 12 * TRANSFORM_STRIDE);
        let base = id.index() * TRANSFORM_STRIDE;
        assert_eq!(out[base], 1.0);
        assert_eq!(out[base + 1], 2.5);
        assert_eq!(out[TRANSFORM_STRIDE], 0.0);
    }
}
