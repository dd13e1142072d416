//! Lane layout
//!
//! Lane indices are saturated into range on construction, so a `LaneIndex`
//! can always be turned into a coordinate.

use serde::{Deserialize, Serialize};

use crate::consts::{CENTER_LANE, LANE_COUNT};

/// Index of a lane, always within `[0, LANE_COUNT)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneIndex(usize);

impl LaneIndex {
    pub const LEFT: LaneIndex = LaneIndex(0);
    pub const CENTER: LaneIndex = LaneIndex(CENTER_LANE);
    pub const RIGHT: LaneIndex = LaneIndex(LANE_COUNT - 1);

    /// Saturate any integer into the valid lane range
    #[inline]
    pub fn clamp(i: i64) -> Self {
        LaneIndex(i.clamp(0, LANE_COUNT as i64 - 1) as usize)
    }

    /// The lane `delta` steps away, stopping at the edges
    #[inline]
    pub fn shifted(self, delta: i64) -> Self {
        Self::clamp(self.0 as i64 + delta)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Lateral coordinates of every lane, left to right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lanes([f32; LANE_COUNT]);

impl Lanes {
    pub const fn new(coords: [f32; LANE_COUNT]) -> Self {
        Self(coords)
    }

    /// Lateral coordinate of a lane
    #[inline]
    pub fn coordinate(&self, lane: LaneIndex) -> f32 {
        self.0[lane.0]
    }

    #[inline]
    pub fn clamp_index(&self, i: i64) -> LaneIndex {
        LaneIndex::clamp(i)
    }

    #[inline]
    pub fn center(&self) -> LaneIndex {
        LaneIndex::CENTER
    }

    pub fn coordinates(&self) -> &[f32; LANE_COUNT] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LANES;
    use proptest::prelude::*;

    #[test]
    fn test_coordinates() {
        let lanes = Lanes::new(LANES);
        assert_eq!(lanes.coordinate(LaneIndex::LEFT), -2.5);
        assert_eq!(lanes.coordinate(lanes.center()), 0.0);
        assert_eq!(lanes.coordinate(LaneIndex::RIGHT), 2.5);
        assert_eq!(lanes.coordinates().len(), LANE_COUNT);
    }

    #[test]
    fn test_shift_saturates_at_edges() {
        assert_eq!(LaneIndex::CENTER.shifted(-1), LaneIndex::LEFT);
        assert_eq!(LaneIndex::LEFT.shifted(-1), LaneIndex::LEFT);
        assert_eq!(LaneIndex::RIGHT.shifted(1), LaneIndex::RIGHT);
        assert_eq!(LaneIndex::LEFT.shifted(5), LaneIndex::RIGHT);
    }

    proptest! {
        #[test]
        fn prop_clamp_in_range(i in any::<i64>()) {
            let lane = LaneIndex::clamp(i);
            prop_assert!(lane.get() < LANE_COUNT);
        }

        #[test]
        fn prop_clamp_idempotent(i in any::<i64>()) {
            let lanes = Lanes::new(LANES);
            let once = lanes.clamp_index(i);
            let twice = lanes.clamp_index(once.get() as i64);
            prop_assert_eq!(once, twice);
        }
    }
}
