//! Game state and core simulation types
//!
//! One `GameState` is one session. Everything the frame tick touches lives
//! here, so independent sessions never share anything.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lanes::LaneIndex;
use super::pool::{ObstacleId, ObstaclePool};
use super::spawn::SpawnTimer;
use crate::consts::*;
use crate::{Tuning, TuningError};

/// Undrained events beyond this are discarded at the next tick
pub const MAX_PENDING_EVENTS: usize = 256;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing
    Running,
    /// Frozen after a collision until restart
    GameOver,
}

/// Decoded player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Restart,
}

/// Notable things that happened since the last drain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: ObstacleId, lane: LaneIndex },
    ObstacleRecycled { id: ObstacleId },
    Collision { id: ObstacleId },
    Restarted,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec3,
    /// Lane the ship is easing toward
    pub target_lane: LaneIndex,
    /// Roll while changing lanes (presentation only)
    pub lean: f32,
}

impl Player {
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec3::new(x, PLAYER_Y, PLAYER_Z),
            target_lane: LaneIndex::CENTER,
            lean: 0.0,
        }
    }

    /// Step x toward `target_x` by at most `max_step`, never overshooting
    pub fn move_toward(&mut self, target_x: f32, max_step: f32) {
        let delta = target_x - self.pos.x;
        if delta == 0.0 {
            self.lean = 0.0;
            return;
        }

        let direction = delta.signum();
        if delta.abs() <= max_step {
            self.pos.x = target_x;
        } else {
            self.pos.x += direction * max_step;
        }
        self.lean = -direction * PLAYER_LEAN;
    }

    /// Render orientation: nose pointing down the track, rolled by lean
    pub fn rotation(&self) -> Vec3 {
        Vec3::new(std::f32::consts::PI, 0.0, self.lean)
    }
}

/// Per-session timing, difficulty and score
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    pub spawn: SpawnTimer,
    /// Host timestamp of the previous frame (ms)
    pub last_frame_ms: Option<f64>,
    /// Global speed scalar
    pub difficulty: f32,
    /// Unrounded score
    pub raw_score: f64,
    /// `floor(raw_score)`
    pub score: u64,
    /// Best score this process has seen
    pub best_score: u64,
}

impl SimClock {
    fn new(base_speed: f32) -> Self {
        Self {
            spawn: SpawnTimer::default(),
            last_frame_ms: None,
            difficulty: base_speed,
            raw_score: 0.0,
            score: 0,
            best_score: 0,
        }
    }

    /// Clear everything but the best score and the frame timestamp
    fn reset(&mut self, base_speed: f32) {
        self.spawn.reset();
        self.difficulty = base_speed;
        self.raw_score = 0.0;
        self.score = 0;
    }

    pub fn add_score(&mut self, amount: f64) {
        self.raw_score += amount;
        self.score = self.raw_score.floor() as u64;
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was built from
    pub seed: u64,
    pub(crate) tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub pool: ObstaclePool,
    pub clock: SimClock,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a running session with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a running session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(tuning.lanes.coordinate(LaneIndex::CENTER));
        let pool = ObstaclePool::new(tuning.pool_capacity, tuning.spawn_distance);
        let clock = SimClock::new(tuning.base_speed);
        let events = Vec::with_capacity(tuning.pool_capacity + 4);
        log::info!(
            "New session (seed {}, {} obstacles, {} ms spawn interval)",
            seed,
            tuning.pool_capacity,
            tuning.spawn_interval_ms
        );

        Self {
            seed,
            tuning,
            phase: GamePhase::Running,
            player,
            pool,
            clock,
            events,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u64 {
        self.clock.score
    }

    pub fn best_score(&self) -> u64 {
        self.clock.best_score
    }

    pub fn difficulty(&self) -> f32 {
        self.clock.difficulty
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Apply a decoded intent immediately. Returns false if the current phase
    /// ignores it.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        match (intent, self.phase) {
            (Intent::MoveLeft, GamePhase::Running) => {
                self.player.target_lane = self.player.target_lane.shifted(-1);
                true
            }
            (Intent::MoveRight, GamePhase::Running) => {
                self.player.target_lane = self.player.target_lane.shifted(1);
                true
            }
            (Intent::Restart, GamePhase::GameOver) => {
                self.restart();
                true
            }
            _ => false,
        }
    }

    /// Advance using a host timestamp; the first frame integrates nothing
    pub fn frame(&mut self, now_ms: f64) {
        let dt_ms = match self.clock.last_frame_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.clock.last_frame_ms = Some(now_ms);
        super::tick(self, dt_ms);
    }

    /// Events since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Enter GameOver after hitting `id`
    pub(crate) fn end_run(&mut self, id: ObstacleId) {
        self.phase = GamePhase::GameOver;
        self.clock.best_score = self.clock.best_score.max(self.clock.score);
        self.push_event(GameEvent::Collision { id });
        log::info!(
            "Game over: hit obstacle {} with score {} (best {})",
            id.index(),
            self.clock.score,
            self.clock.best_score
        );
    }

    fn restart(&mut self) {
        self.pool.reset_all();
        let center = self.tuning.lanes.center();
        self.player.target_lane = center;
        self.player.pos.x = self.tuning.lanes.coordinate(center);
        self.player.lean = 0.0;
        self.clock.reset(self.tuning.base_speed);
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Restarted);
        log::info!("Restarted (best score {})", self.clock.best_score);
    }
}
