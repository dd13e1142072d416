//! Neon Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (lanes, obstacle pool, collisions, game state)
//! - `platform`: Browser frame loop, headless driver, input decoding
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Number of lanes (fixed for the process lifetime)
    pub const LANE_COUNT: usize = 3;
    /// Default lateral lane coordinates, left to right
    pub const LANES: [f32; LANE_COUNT] = [-2.5, 0.0, 2.5];
    /// Lane the player starts in and returns to on restart
    pub const CENTER_LANE: usize = 1;

    /// Obstacles allocated at startup
    pub const OBSTACLE_POOL_CAPACITY: usize = 12;
    /// Time between spawn attempts (ms)
    pub const SPAWN_INTERVAL_MS: f32 = 1100.0;
    /// Upper bound of the random per-obstacle speed bonus
    pub const SPAWN_SPEED_JITTER: f32 = 2.0;

    /// Difficulty scalar at the start of a run
    pub const BASE_SPEED: f32 = 9.0;
    /// Difficulty gained per elapsed millisecond
    pub const SPEED_INCREMENT_PER_MS: f32 = 0.0025;
    /// Converts difficulty (per second) into forward units
    pub const FORWARD_SCALE: f32 = 12.0;
    /// Frame length the per-frame rates below were tuned against (ms)
    pub const REFERENCE_FRAME_MS: f32 = 16.6;
    /// Max lateral player travel per reference frame at base speed
    pub const LANE_CHANGE_STEP: f32 = 0.05;
    /// Score gained per elapsed millisecond
    pub const SCORE_PER_MS: f64 = 0.05;
    /// Longest frame the simulation will integrate in one go (ms)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Forward position where obstacles appear
    pub const SPAWN_DISTANCE: f32 = -120.0;
    /// Obstacles past this forward position are recycled
    pub const DESPAWN_DISTANCE: f32 = 10.0;

    /// Player placement (only x moves)
    pub const PLAYER_Y: f32 = 1.0;
    pub const PLAYER_Z: f32 = 5.0;
    /// Player collision half extents (cone of radius 0.6, height 2)
    pub const PLAYER_HALF_EXTENTS: [f32; 3] = [0.6, 1.0, 0.6];
    /// Lean angle while changing lanes (radians)
    pub const PLAYER_LEAN: f32 = 0.25;

    /// Obstacle ride height
    pub const OBSTACLE_Y: f32 = 0.8;
    /// Obstacle collision half extent on every axis (mesh circumradius)
    pub const OBSTACLE_HALF_EXTENT: f32 = 0.8;
    /// Cosmetic spin per reference frame (radians, x/y/z)
    pub const OBSTACLE_SPIN: [f32; 3] = [0.01, 0.02, 0.0];
}
