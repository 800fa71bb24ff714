//! Debug overlay toggle.
//!
//! Triggering [`SwitchDebugEvent`] adds or removes the [`DebugMode`]
//! resource. Turning the overlay on also logs a one-line summary of the lanes
//! so the state is visible in headless runs too.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::commentindex::CommentIndex;
use crate::resources::debugmode::DebugMode;
use crate::resources::lanes::LaneOccupancy;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
    lanes: Res<LaneOccupancy>,
    index: Res<CommentIndex>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        info!("Debug overlay off");
        return;
    }
    commands.insert_resource(DebugMode {});
    let per_lane: Vec<u32> = (0..lanes.lane_count())
        .map(|lane| lanes.occupants(lane))
        .collect();
    info!(
        "Debug overlay on: {} active comments, lane occupants {:?}",
        index.len(),
        per_lane
    );
}
