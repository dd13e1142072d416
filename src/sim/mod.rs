//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Wall-clock deltas only, clamped before integration
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lanes;
pub mod motion;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Aabb, first_hit, obstacle_bounds, player_bounds};
pub use lanes::{LaneIndex, Lanes};
pub use pool::{Obstacle, ObstacleId, ObstaclePool};
pub use spawn::{SpawnTimer, spawn_obstacle};
pub use state::{GameEvent, GamePhase, GameState, Intent, MAX_PENDING_EVENTS, Player, SimClock};
pub use tick::{sanitize_delta, tick};
pub use view::{FrameView, ObstacleView, TRANSFORM_STRIDE, Transform, write_obstacle_transforms};
