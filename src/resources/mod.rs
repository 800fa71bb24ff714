//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `commentindex` – comment id allocation and id → entity lookup
//! - `content` – comment texts and colour palette sampled by the spawner
//! - `danmuconfig` – INI-backed overlay configuration
//! - `debugmode` – presence toggles the debug overlay
//! - `enginestate` – running/stopped lifecycle
//! - `feed` – channel of externally supplied comment texts
//! - `lanes` – per-lane occupancy and the lane picker
//! - `spawntimer` – pending spawn firing and the shared random source
//! - `viewport` – reported overlay size with fallback
//! - `worldtime` – host timestamp and motion update throttle
pub mod commentindex;
pub mod content;
pub mod danmuconfig;
pub mod debugmode;
pub mod enginestate;
pub mod feed;
pub mod lanes;
pub mod spawntimer;
pub mod viewport;
pub mod worldtime;
