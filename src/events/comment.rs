//! Comment lifecycle messages.
//!
//! One message is written per actual state transition: a spawn, a
//! retirement, or a width change. Hosts and tests read them through
//! `Messages<CommentMessage>`; the engine advances the queue once per frame.

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum CommentMessage {
    /// A comment entered the active set.
    Spawned {
        id: u64,
        lane: usize,
        /// The lane was already occupied when it was picked.
        shared: bool,
    },
    /// A comment left the visible range and its lane was released.
    Retired { id: u64, lane: usize },
    /// A measured width replaced the stored one.
    WidthCorrected { id: u64, width: f32 },
}

impl CommentMessage {
    /// Id of the comment the message is about.
    pub fn id(&self) -> u64 {
        match self {
            CommentMessage::Spawned { id, .. }
            | CommentMessage::Retired { id, .. }
            | CommentMessage::WidthCorrected { id, .. } => *id,
        }
    }
}
