//! ECS components for comment entities.
//!
//! Submodules overview:
//! - [`comment`] – comment id and lane
//! - [`commenttext`] – text, font size, colour and rendered width
//! - [`screenposition`] – screen-space position of the comment's top-left corner
//! - [`scroll`] – leftward speed in pixels per second

pub mod comment;
pub mod commenttext;
pub mod screenposition;
pub mod scroll;
