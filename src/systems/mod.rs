//! Engine systems.
//!
//! This module groups the ECS systems that spawn, move and retire comments,
//! plus the host-side rendering helpers.
//!
//! Submodules overview
//! - [`commentwidth`] – text measurement trait and width correction
//! - [`messages`] – advance the comment message queue
//! - [`movement`] – move comments left and retire those off-screen
//! - [`render`] – draw comments and the debug overlay using Raylib
//! - [`spawner`] – spawn chain, comment feed and the comment spawner
//! - [`time`] – host timestamps and the motion throttle

pub mod commentwidth;
pub mod messages;
pub mod movement;
pub mod render;
pub mod spawner;
pub mod time;
