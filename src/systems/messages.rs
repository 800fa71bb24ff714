use bevy_ecs::prelude::*;

use crate::events::comment::CommentMessage;

/// Advance the ECS message queue for [`CommentMessage`].
///
/// Messages stay readable for the frame they were written in and the next
/// one; run this once per frame, before any system writes.
pub fn update_comment_messages(mut msgs: ResMut<Messages<CommentMessage>>) {
    msgs.update();
}
