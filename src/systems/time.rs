//! Time update system.
//!
//! Stores the host's frame timestamp on the shared
//! [`WorldTime`](crate::resources::worldtime::WorldTime) resource and exposes
//! the run condition that throttles motion updates.
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::resources::worldtime::WorldTime;

/// Record the host timestamp `now` (milliseconds) for this frame.
///
/// Timestamps older than the previous one are stored as well; they simply
/// never make a motion update due. Non-finite timestamps are dropped.
pub fn update_world_time(world: &mut World, now: f64) {
    if !now.is_finite() {
        warn!("Dropping non-finite frame timestamp {}", now);
        return;
    }
    let mut wt = world.resource_mut::<WorldTime>();
    if now < wt.now {
        debug!("Frame timestamp went backwards: {} -> {}", wt.now, now);
    }
    wt.now = now;
}

/// Run condition: true when the update interval has elapsed.
pub fn motion_tick_due(time: Res<WorldTime>) -> bool {
    time.update_due()
}
