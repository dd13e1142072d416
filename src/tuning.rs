//! Data-driven game balance
//!
//! Defaults reproduce the shipped game. Overrides come from JSON; any field
//! left out keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Lanes;

/// Errors produced while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lateral lane coordinates, strictly increasing
    pub lanes: Lanes,
    /// Number of pooled obstacles
    pub pool_capacity: usize,
    pub spawn_interval_ms: f32,
    pub spawn_speed_jitter: f32,
    pub base_speed: f32,
    pub speed_increment_per_ms: f32,
    pub forward_scale: f32,
    pub lane_change_step: f32,
    pub score_per_ms: f64,
    /// Frames longer than this are clamped before integration
    pub max_frame_delta_ms: f32,
    pub spawn_distance: f32,
    pub despawn_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: Lanes::new(LANES),
            pool_capacity: OBSTACLE_POOL_CAPACITY,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_speed_jitter: SPAWN_SPEED_JITTER,
            base_speed: BASE_SPEED,
            speed_increment_per_ms: SPEED_INCREMENT_PER_MS,
            forward_scale: FORWARD_SCALE,
            lane_change_step: LANE_CHANGE_STEP,
            score_per_ms: SCORE_PER_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            spawn_distance: SPAWN_DISTANCE,
            despawn_distance: DESPAWN_DISTANCE,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every value keeps the simulation well defined
    pub fn validate(&self) -> Result<(), TuningError> {
        let coords = self.lanes.coordinates();
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(invalid("lanes", "coordinates must be finite"));
        }
        if coords.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(invalid("lanes", "coordinates must be strictly increasing"));
        }
        if self.pool_capacity == 0 {
            return Err(invalid("pool_capacity", "must hold at least one obstacle"));
        }

        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("base_speed", self.base_speed)?;
        positive("forward_scale", self.forward_scale)?;
        positive("lane_change_step", self.lane_change_step)?;
        positive("max_frame_delta_ms", self.max_frame_delta_ms)?;
        non_negative("spawn_speed_jitter", self.spawn_speed_jitter)?;
        non_negative("speed_increment_per_ms", self.speed_increment_per_ms)?;
        if !(self.score_per_ms.is_finite() && self.score_per_ms >= 0.0) {
            return Err(invalid("score_per_ms", "must be finite and non-negative"));
        }

        if !(self.spawn_distance.is_finite() && self.despawn_distance.is_finite()) {
            return Err(invalid("spawn_distance", "distances must be finite"));
        }
        if self.spawn_distance >= self.despawn_distance {
            return Err(invalid(
                "despawn_distance",
                "must lie beyond the spawn distance",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.pool_capacity, 12);
        assert_eq!(tuning.spawn_interval_ms, 1100.0);
        assert_eq!(tuning.base_speed, 9.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pool_capacity": 4, "base_speed": 12.5 }"#).unwrap();
        assert_eq!(tuning.pool_capacity, 4);
        assert_eq!(tuning.base_speed, 12.5);
        assert_eq!(tuning.spawn_interval_ms, SPAWN_INTERVAL_MS);
        assert_eq!(tuning.lanes, Lanes::new(LANES));
    }

    #[test]
    fn test_lanes_from_json() {
        let tuning = Tuning::from_json(r#"{ "lanes": [-3.0, 0.0, 3.0] }"#).unwrap();
        assert_eq!(tuning.lanes.coordinates(), &[-3.0, 0.0, 3.0]);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{ "pool_capacity": 0 }"#,
            r#"{ "spawn_interval_ms": 0.0 }"#,
            r#"{ "base_speed": -1.0 }"#,
            r#"{ "speed_increment_per_ms": -0.1 }"#,
            r#"{ "lanes": [0.0, 0.0, 1.0] }"#,
            r#"{ "lanes": [2.5, 0.0, -2.5] }"#,
            r#"{ "spawn_distance": 20.0 }"#,
            r#"{ "max_frame_delta_ms": 0.0 }"#,
        ];
        for json in cases {
            let result = Tuning::from_json(json);
            assert!(
                matches!(result, Err(TuningError::Invalid { .. })),
                "expected {json} to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "lanes": [1.0, 2.0] }"#),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
