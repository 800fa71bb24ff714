//! Danmugo library.
//!
//! This module exposes the overlay's ECS components, resources, systems,
//! events and the [`engine::DanmuEngine`] facade for use in integration
//! tests and by the `danmugo` binary.

pub mod components;
pub mod engine;
pub mod events;
pub mod resources;
pub mod systems;
