//! Event and message types used by the engine.
//!
//! Submodules:
//! - [`comment`] – spawn, retirement and width-correction messages
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod comment;
pub mod switchdebug;
