//! Comment identity component.
//!
//! Every spawned comment entity carries a [`Comment`] with its id and lane.
//! Both are fixed for the comment's lifetime; the lane is released exactly
//! once, when the motion system retires the entity.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comment {
    /// Unique, increasing, never reused.
    pub id: u64,
    /// Lane index the comment travels along.
    pub lane: usize,
}

impl Comment {
    pub fn new(id: u64, lane: usize) -> Self {
        Self { id, lane }
    }
}
