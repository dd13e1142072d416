//! Obstacle spawn cadence and activation

use std::f32::consts::PI;

use rand::Rng;

use super::lanes::LaneIndex;
use super::pool::{ObstacleId, ObstaclePool};
use crate::Tuning;
use crate::consts::{LANE_COUNT, OBSTACLE_Y};

/// Time accumulator that fires once per spawn interval
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnTimer {
    elapsed_ms: f32,
}

impl SpawnTimer {
    /// Add a frame's worth of time. Returns true when a spawn is due.
    ///
    /// The accumulator restarts from zero on every trigger; any overshoot
    /// past the interval is dropped.
    pub fn advance(&mut self, dt_ms: f32, interval_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}

/// Activate one pooled obstacle in a random lane at the spawn distance.
///
/// Returns `None` without side effects when the pool is exhausted.
pub fn spawn_obstacle<R: Rng + ?Sized>(
    pool: &mut ObstaclePool,
    tuning: &Tuning,
    difficulty: f32,
    rng: &mut R,
) -> Option<(ObstacleId, LaneIndex)> {
    let Some(id) = pool.acquire() else {
        log::debug!("Obstacle pool exhausted, skipping spawn");
        return None;
    };

    let lane = LaneIndex::clamp(rng.random_range(0..LANE_COUNT) as i64);
    let obstacle = pool.get_mut(id)?;
    obstacle.pos.x = tuning.lanes.coordinate(lane);
    obstacle.pos.y = OBSTACLE_Y;
    obstacle.pos.z = tuning.spawn_distance;
    obstacle.prev_z = tuning.spawn_distance;
    obstacle.rotation.x = rng.random_range(0.0..PI);
    obstacle.rotation.y = rng.random_range(0.0..PI);
    obstacle.rotation.z = rng.random_range(0.0..PI);
    obstacle.speed = difficulty + rng.random::<f32>() * tuning.spawn_speed_jitter;

    log::debug!(
        "Spawned obstacle {} in lane {} (speed {:.2})",
        id.index(),
        lane.get(),
        obstacle.speed
    );
    Some((id, lane))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_fires_after_interval() {
        let mut timer = SpawnTimer::default();
        assert!(!timer.advance(600.0, 1100.0));
        assert!(!timer.advance(500.0, 1100.0)); // exactly 1100 is not past
        assert!(timer.advance(1.0, 1100.0));
        assert_eq!(timer.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_timer_drops_overshoot() {
        let mut timer = SpawnTimer::default();
        assert!(timer.advance(2000.0, 1100.0));
        assert_eq!(timer.elapsed_ms(), 0.0);
        assert!(!timer.advance(1000.0, 1100.0));
    }

    #[test]
    fn test_spawned_obstacle_placement() {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new(tuning.pool_capacity, tuning.spawn_distance);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..tuning.pool_capacity {
            let (id, lane) = spawn_obstacle(&mut pool, &tuning, 9.0, &mut rng).unwrap();
            let obstacle = pool.get(id).unwrap();
            assert!(obstacle.is_active());
            assert_eq!(obstacle.pos.x, tuning.lanes.coordinate(lane));
            assert_eq!(obstacle.pos.z, tuning.spawn_distance);
            assert!(obstacle.speed >= 9.0 && obstacle.speed < 9.0 + tuning.spawn_speed_jitter);
            for angle in obstacle.rotation.to_array() {
                assert!((0.0..PI).contains(&angle));
            }
        }
    }

    #[test]
    fn test_thirteenth_spawn_is_noop() {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new(tuning.pool_capacity, tuning.spawn_distance);
        let mut timer = SpawnTimer::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut spawned = 0;
        for _ in 0..13 {
            assert!(timer.advance(tuning.spawn_interval_ms + 1.0, tuning.spawn_interval_ms));
            if spawn_obstacle(&mut pool, &tuning, tuning.base_speed, &mut rng).is_some() {
                spawned += 1;
            }
        }

        assert_eq!(spawned, 12);
        assert_eq!(pool.active_count(), 12);
        assert_eq!(pool.available(), 0);
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_lanes_are_all_used() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; LANE_COUNT];
        for _ in 0..64 {
            let mut pool = ObstaclePool::new(1, tuning.spawn_distance);
            let (_, lane) = spawn_obstacle(&mut pool, &tuning, 9.0, &mut rng).unwrap();
            seen[lane.get()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
