//! Per-frame simulation tick
//!
//! Order within a frame: spawn, difficulty ramp, player and obstacle motion,
//! collision, recycling, score. Nothing moves once the run is over.

use super::collision::first_hit;
use super::motion::{advance_obstacles, ramp_difficulty, steer_player};
use super::spawn::spawn_obstacle;
use super::state::{GameEvent, GamePhase, GameState, MAX_PENDING_EVENTS};

/// Clamp a host frame delta into something safe to integrate.
///
/// Negative and NaN deltas become zero. Spikes (tab backgrounded, debugger
/// pause) are capped at `max_ms` so obstacles cannot jump half the track in
/// one frame.
pub fn sanitize_delta(dt_ms: f32, max_ms: f32) -> f32 {
    if dt_ms.is_nan() || dt_ms <= 0.0 {
        return 0.0;
    }
    if dt_ms > max_ms {
        log::debug!("Clamping frame delta {:.1} ms to {:.1} ms", dt_ms, max_ms);
        return max_ms;
    }
    dt_ms
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if state.events.len() >= MAX_PENDING_EVENTS {
        log::debug!("Discarding {} undrained events", state.events.len());
        state.events.clear();
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    let dt_ms = sanitize_delta(dt_ms, state.tuning.max_frame_delta_ms);
    if dt_ms == 0.0 {
        return;
    }

    let tuning = &state.tuning;

    // Spawn
    if state.clock.spawn.advance(dt_ms, tuning.spawn_interval_ms) {
        if let Some((id, lane)) =
            spawn_obstacle(&mut state.pool, tuning, state.clock.difficulty, &mut state.rng)
        {
            state.events.push(GameEvent::ObstacleSpawned { id, lane });
        }
    }

    // Motion
    state.clock.difficulty = ramp_difficulty(state.clock.difficulty, dt_ms, tuning);
    let difficulty = state.clock.difficulty;
    steer_player(&mut state.player, &tuning.lanes, difficulty, dt_ms, tuning);
    advance_obstacles(&mut state.pool, difficulty, dt_ms, tuning);

    // Collision runs before recycling: an obstacle that sweeps past the
    // player and the despawn line in one frame still hits
    if let Some(id) = first_hit(&state.player, &state.pool) {
        state.end_run(id);
        return;
    }

    // Recycle
    let events = &mut state.events;
    state.pool.recycle_passed(tuning.despawn_distance, |id| {
        log::trace!("Recycled obstacle {}", id.index());
        events.push(GameEvent::ObstacleRecycled { id });
    });

    // Score
    let gained = dt_ms as f64 * state.tuning.score_per_ms;
    state.clock.add_score(gained);
}
