//! Engine lifecycle resource.
//!
//! The host's frame callback checks this state before doing anything else.
//! Stopping the engine ends the spawn chain and motion updates; the comment
//! entities and lane occupancy are simply left behind for the next
//! [`start`](crate::engine::DanmuEngine::start) to discard.

use bevy_ecs::prelude::Resource;

/// Discrete lifecycle states of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineStates {
    Running,
    #[default]
    Stopped,
}

/// Authoritative lifecycle state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EngineState {
    current: EngineStates,
}

impl EngineState {
    /// Create a new state initialized to [`EngineStates::Stopped`].
    pub fn new() -> Self {
        EngineState {
            current: EngineStates::Stopped,
        }
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> EngineStates {
        self.current
    }
    /// Update the current state immediately.
    pub fn set(&mut self, state: EngineStates) {
        self.current = state;
    }
    pub fn is_running(&self) -> bool {
        self.current == EngineStates::Running
    }
}
