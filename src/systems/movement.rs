//! Motion system.
//!
//! Advances every comment leftward by `speed × elapsed` and retires comments
//! whose span `[x, x + width)` no longer reaches the visible range `[0, ∞)`.
//! Retirement despawns the entity, releases its lane and writes a
//! [`CommentMessage::Retired`], all on the same update.
//!
//! The system is gated by
//! [`motion_tick_due`](crate::systems::time::motion_tick_due), which caps
//! updates at the configured logical rate.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::comment::Comment;
use crate::components::commenttext::CommentText;
use crate::components::screenposition::ScreenPosition;
use crate::components::scroll::Scroll;
use crate::events::comment::CommentMessage;
use crate::resources::commentindex::CommentIndex;
use crate::resources::lanes::LaneOccupancy;
use crate::resources::worldtime::WorldTime;

pub fn motion_system(
    mut time: ResMut<WorldTime>,
    mut query: Query<(Entity, &Comment, &Scroll, &CommentText, &mut ScreenPosition)>,
    mut lanes: ResMut<LaneOccupancy>,
    mut index: ResMut<CommentIndex>,
    mut messages: MessageWriter<CommentMessage>,
    mut commands: Commands,
) {
    let elapsed_ms = time.since_update().max(0.0) as f32;

    let mut retired: Vec<(u64, usize, Entity)> = Vec::new();
    for (entity, comment, scroll, text, mut position) in query.iter_mut() {
        position.shift_left(scroll.displacement(elapsed_ms));
        if !position.spans_visible(text.width) {
            retired.push((comment.id, comment.lane, entity));
        }
    }

    retired.sort_unstable_by_key(|(id, _, _)| *id);
    for (id, lane, entity) in retired {
        commands.entity(entity).despawn();
        index.remove(id);
        lanes.release(lane);
        messages.write(CommentMessage::Retired { id, lane });
        debug!("Comment {} retired, lane {} released", id, lane);
    }

    let now = time.now;
    time.delta = elapsed_ms / 1000.0;
    time.last_update = now;
    time.updates += 1;
}
