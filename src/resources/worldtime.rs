//! Simulation clock.
//!
//! The host reports a timestamp (milliseconds) once per display frame. The
//! motion update only runs when at least `update_interval` milliseconds have
//! passed since the last update, which caps the logical update rate
//! regardless of the display refresh rate.

use bevy_ecs::prelude::Resource;

/// Logical updates per second used when nothing else is configured.
pub const DEFAULT_UPDATE_RATE: u32 = 30;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Latest host timestamp in milliseconds.
    pub now: f64,
    /// Timestamp of the last motion update in milliseconds.
    pub last_update: f64,
    /// Minimum spacing between motion updates in milliseconds.
    pub update_interval: f64,
    /// Seconds covered by the last motion update.
    pub delta: f32,
    /// Number of motion updates performed so far.
    pub updates: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            now: 0.0,
            last_update: 0.0,
            update_interval: 1000.0 / DEFAULT_UPDATE_RATE as f64,
            delta: 0.0,
            updates: 0,
        }
    }
}

impl WorldTime {
    /// Set the logical update rate. Rates below one per second are clamped.
    pub fn with_update_rate(mut self, rate: u32) -> Self {
        self.update_interval = 1000.0 / rate.max(1) as f64;
        self
    }

    /// Anchor both timestamps at `now`, as if an update just happened.
    pub fn anchor(&mut self, now: f64) {
        self.now = now;
        self.last_update = now;
        self.delta = 0.0;
    }

    /// Milliseconds since the last motion update.
    pub fn since_update(&self) -> f64 {
        self.now - self.last_update
    }

    /// Whether enough time passed for another motion update.
    pub fn update_due(&self) -> bool {
        self.since_update() >= self.update_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_thirty_hz() {
        let time = WorldTime::default();
        assert!((time.update_interval - 1000.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn zero_rate_is_clamped() {
        let time = WorldTime::default().with_update_rate(0);
        assert!((time.update_interval - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn update_due_after_interval() {
        let mut time = WorldTime::default().with_update_rate(10);
        time.anchor(500.0);
        time.now = 599.0;
        assert!(!time.update_due());
        time.now = 600.0;
        assert!(time.update_due());
    }

    #[test]
    fn stale_timestamp_is_never_due() {
        let mut time = WorldTime::default();
        time.anchor(1000.0);
        time.now = 900.0;
        assert!(!time.update_due());
    }
}
