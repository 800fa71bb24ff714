//! Spawner timing and randomness resources.
//!
//! [`SpawnTimer`] holds at most one pending firing. Each firing schedules the
//! next one, forming a chain that [`SpawnTimer::cancel`] cuts.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Next pending spawn, in host milliseconds.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnTimer {
    next_at: Option<f64>,
    /// Number of firings so far.
    pub fired: u64,
}

impl SpawnTimer {
    pub fn next_at(&self) -> Option<f64> {
        self.next_at
    }

    /// Replace the pending firing.
    pub fn schedule(&mut self, at: f64) {
        self.next_at = Some(at);
    }

    /// Drop the pending firing; nothing fires until the next `schedule`.
    pub fn cancel(&mut self) {
        self.next_at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.next_at.is_some()
    }
}

/// Random source shared by the spawner and lane picker.
#[derive(Resource, Debug, Clone)]
pub struct DanmuRng(pub Rng);

impl Default for DanmuRng {
    fn default() -> Self {
        DanmuRng(Rng::new())
    }
}

impl DanmuRng {
    pub fn with_seed(seed: u64) -> Self {
        DanmuRng(Rng::with_seed(seed))
    }

    /// Uniform sample in `[min, max)`; returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let range = max - min;
        if range < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * range
    }

    /// Uniform sample in `[min, max)`; returns `min` for an empty range.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        let range = max - min;
        if range < f64::EPSILON {
            return min;
        }
        min + self.0.f64() * range
    }
}
