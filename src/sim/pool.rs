//! Fixed-capacity obstacle pool
//!
//! Every obstacle is allocated when the pool is built and lives until the
//! session ends. Spawning pops a slot off the head of the free queue,
//! recycling pushes it back onto the tail. Neither path allocates: the free
//! queue is reserved at full capacity up front and never holds more than
//! `capacity` ids.

use std::collections::VecDeque;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{OBSTACLE_SPIN, OBSTACLE_Y};

/// Handle to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleId(usize);

impl ObstacleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A pooled obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    active: bool,
    pub pos: Vec3,
    /// Forward position at the start of the current frame
    pub prev_z: f32,
    /// Speed assigned at activation (global speed + jitter)
    pub speed: f32,
    /// Cosmetic orientation (Euler XYZ, radians)
    pub rotation: Vec3,
    /// Cosmetic spin per reference frame
    pub spin: Vec3,
}

impl Obstacle {
    fn parked(id: ObstacleId, parked_z: f32) -> Self {
        Self {
            id,
            active: false,
            pos: Vec3::new(0.0, OBSTACLE_Y, parked_z),
            prev_z: parked_z,
            speed: 0.0,
            rotation: Vec3::ZERO,
            spin: Vec3::from_array(OBSTACLE_SPIN),
        }
    }

    fn park(&mut self, parked_z: f32) {
        self.active = false;
        self.pos.z = parked_z;
        self.prev_z = parked_z;
    }

    /// Active obstacles are on the track and visible
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move forward by `distance`, remembering where the frame started
    pub fn advance(&mut self, distance: f32) {
        self.prev_z = self.pos.z;
        self.pos.z += distance;
    }

    /// Advance cosmetic rotation by `frames` reference frames
    pub fn rotate(&mut self, frames: f32) {
        self.rotation += self.spin * frames;
    }
}

/// Arena of obstacles with a FIFO free list
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    slots: Vec<Obstacle>,
    free: VecDeque<ObstacleId>,
    parked_z: f32,
}

impl ObstaclePool {
    /// Allocate `capacity` inactive obstacles parked at `parked_z`
    pub fn new(capacity: usize, parked_z: f32) -> Self {
        let slots: Vec<Obstacle> = (0..capacity)
            .map(|i| Obstacle::parked(ObstacleId(i), parked_z))
            .collect();
        let mut free = VecDeque::with_capacity(capacity);
        free.extend(slots.iter().map(|o| o.id));
        Self {
            slots,
            free,
            parked_z,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Obstacles waiting in the free queue
    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Take the oldest inactive obstacle. `None` when every obstacle is in use.
    pub fn acquire(&mut self) -> Option<ObstacleId> {
        let id = self.free.pop_front()?;
        let slot = &mut self.slots[id.0];
        debug_assert!(!slot.active, "free queue held active obstacle {id:?}");
        slot.active = true;
        debug_assert!(self.is_consistent());
        Some(id)
    }

    /// Park an active obstacle and queue it for reuse.
    ///
    /// Only active handles may be released. Releasing an inactive one trips a
    /// debug assertion and is otherwise ignored.
    pub fn release(&mut self, id: ObstacleId) {
        let parked_z = self.parked_z;
        let Some(slot) = self.slots.get_mut(id.0) else {
            debug_assert!(false, "released unknown obstacle {id:?}");
            return;
        };
        if !slot.active {
            debug_assert!(false, "released inactive obstacle {id:?}");
            return;
        }
        slot.park(parked_z);
        self.free.push_back(id);
        debug_assert!(self.is_consistent());
    }

    /// Deactivate everything and rebuild the free queue in slot order
    pub fn reset_all(&mut self) {
        self.free.clear();
        for slot in &mut self.slots {
            slot.park(self.parked_z);
            self.free.push_back(slot.id);
        }
    }

    /// Release every active obstacle past `limit`, reporting each one
    pub fn recycle_passed(&mut self, limit: f32, mut on_recycle: impl FnMut(ObstacleId)) {
        for i in 0..self.slots.len() {
            let slot = &self.slots[i];
            if slot.active && slot.pos.z > limit {
                let id = slot.id;
                self.release(id);
                on_recycle(id);
            }
        }
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.slots.get_mut(id.0)
    }

    /// All slots in id order, active or not
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter().filter(|o| o.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.slots.iter_mut().filter(|o| o.active)
    }

    /// Every slot is in exactly one partition
    pub fn is_consistent(&self) -> bool {
        let active = self.slots.iter().filter(|o| o.active).count();
        if active + self.free.len() != self.slots.len() {
            return false;
        }
        self.free.iter().all(|id| {
            self.slots.get(id.0).is_some_and(|o| !o.active)
                && self.free.iter().filter(|&&other| other == *id).count() == 1
        })
    }
}
