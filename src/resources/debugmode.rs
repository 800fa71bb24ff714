//! Debug overlay toggle.
//!
//! While this resource exists the host draws lane occupancy, the active
//! comment count and frame statistics on top of the comments.

use bevy_ecs::prelude::Resource;

/// Marker resource: present while the debug overlay is shown.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
