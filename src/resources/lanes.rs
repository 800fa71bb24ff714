//! Lane occupancy resource.
//!
//! The overlay is split into a fixed number of horizontal lanes. A lane is
//! occupied while at least one unretired comment travels along it. The
//! spawner asks [`LaneOccupancy::pick_lane`] for a lane, then claims it; the
//! motion system releases it when the comment retires.
//!
//! Picking and claiming are separate steps: `pick_lane` only observes the
//! occupancy, `claim` mutates it.
//!
//! When every lane is occupied the picker still answers, with a uniformly
//! random lane marked as [`LaneChoice::Shared`]. The comment then overlaps
//! visually with the current occupant. Occupancy is tracked per lane as an
//! occupant counter so that both comments release their share and the lane
//! only becomes free once the last one retires.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::warn;
use smallvec::SmallVec;

/// Number of lanes used when the configuration does not override it.
pub const DEFAULT_LANE_COUNT: usize = 10;
/// Largest supported number of lanes.
pub const MAX_LANE_COUNT: usize = 1024;

/// Result of [`LaneOccupancy::pick_lane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneChoice {
    /// The lane had no active comment.
    Free(usize),
    /// Every lane was occupied; this lane will be shared.
    Shared(usize),
}

impl LaneChoice {
    /// The chosen lane index.
    pub fn lane(self) -> usize {
        match self {
            LaneChoice::Free(lane) | LaneChoice::Shared(lane) => lane,
        }
    }

    /// True when the all-lanes-occupied fallback was used.
    pub fn is_shared(self) -> bool {
        matches!(self, LaneChoice::Shared(_))
    }
}

/// Per-lane occupant counters.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LaneOccupancy {
    occupants: Vec<u32>,
}

impl Default for LaneOccupancy {
    fn default() -> Self {
        Self::new(DEFAULT_LANE_COUNT)
    }
}

impl LaneOccupancy {
    /// Create `lane_count` free lanes, clamped to `1..=MAX_LANE_COUNT`.
    pub fn new(lane_count: usize) -> Self {
        if lane_count > MAX_LANE_COUNT {
            warn!("{} lanes requested, using {}", lane_count, MAX_LANE_COUNT);
        }
        Self {
            occupants: vec![0; lane_count.clamp(1, MAX_LANE_COUNT)],
        }
    }

    /// Number of lanes.
    pub fn lane_count(&self) -> usize {
        self.occupants.len()
    }

    /// Whether `lane` currently holds an unretired comment.
    pub fn is_occupied(&self, lane: usize) -> bool {
        self.occupants(lane) > 0
    }

    /// How many active comments currently travel along `lane`.
    pub fn occupants(&self, lane: usize) -> u32 {
        self.occupants.get(lane).copied().unwrap_or(0)
    }

    /// Indices of all lanes without an active comment, in ascending order.
    pub fn free_lanes(&self) -> SmallVec<[usize; 16]> {
        self.occupants
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of occupied lanes.
    pub fn occupied_count(&self) -> usize {
        self.occupants.iter().filter(|count| **count > 0).count()
    }

    /// True when no lane is occupied.
    pub fn all_free(&self) -> bool {
        self.occupants.iter().all(|count| *count == 0)
    }

    /// Choose a lane for a new comment without claiming it.
    ///
    /// Free lanes are preferred, chosen uniformly. With every lane taken,
    /// a uniformly random lane is returned as [`LaneChoice::Shared`].
    pub fn pick_lane(&self, rng: &mut Rng) -> LaneChoice {
        let free = self.free_lanes();
        if free.is_empty() {
            LaneChoice::Shared(rng.usize(0..self.lane_count()))
        } else {
            LaneChoice::Free(free[rng.usize(0..free.len())])
        }
    }

    /// Mark `lane` as holding one more active comment.
    pub fn claim(&mut self, lane: usize) {
        match self.occupants.get_mut(lane) {
            Some(count) => *count = count.saturating_add(1),
            None => warn!(
                "claim on lane {} ignored, only {} lanes exist",
                lane,
                self.occupants.len()
            ),
        }
    }

    /// Mark one comment on `lane` as gone. Releasing a free lane is a no-op.
    pub fn release(&mut self, lane: usize) {
        match self.occupants.get_mut(lane) {
            Some(count) => *count = count.saturating_sub(1),
            None => warn!(
                "release on lane {} ignored, only {} lanes exist",
                lane,
                self.occupants.len()
            ),
        }
    }

    /// Free every lane.
    pub fn clear(&mut self) {
        self.occupants.iter_mut().for_each(|count| *count = 0);
    }
}
