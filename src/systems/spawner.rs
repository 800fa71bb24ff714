//! Comment spawning systems.
//!
//! - [`spawn_timer_system`] fires the self-rescheduling spawn chain kept in
//!   [`SpawnTimer`]. Each firing spawns one comment and schedules exactly one
//!   next firing after a random delay.
//! - [`poll_comment_feed`] spawns texts that arrived through the optional
//!   [`CommentFeed`] channel.
//!
//! Both go through [`CommentSpawner`], which samples the comment's look,
//! picks and claims a lane, and registers the new entity.
//!
//! # Ordering
//!
//! Both systems run **before** the motion system, so a comment spawned in a
//! frame that also performs a motion update moves on that update.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, warn};

use crate::components::comment::Comment;
use crate::components::commenttext::CommentText;
use crate::components::screenposition::ScreenPosition;
use crate::components::scroll::Scroll;
use crate::events::comment::CommentMessage;
use crate::resources::commentindex::CommentIndex;
use crate::resources::content::{ContentSource, Palette};
use crate::resources::danmuconfig::DanmuConfig;
use crate::resources::feed::CommentFeed;
use crate::resources::lanes::LaneOccupancy;
use crate::resources::spawntimer::{DanmuRng, SpawnTimer};
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;

/// Shortest delay between two spawns, in milliseconds.
const MIN_SPAWN_DELAY_MS: f64 = 1.0;

/// Everything needed to create one comment entity.
#[derive(SystemParam)]
pub struct CommentSpawner<'w, 's> {
    commands: Commands<'w, 's>,
    lanes: ResMut<'w, LaneOccupancy>,
    index: ResMut<'w, CommentIndex>,
    rng: ResMut<'w, DanmuRng>,
    content: Res<'w, ContentSource>,
    palette: Res<'w, Palette>,
    viewport: Res<'w, Viewport>,
    config: Res<'w, DanmuConfig>,
    messages: MessageWriter<'w, CommentMessage>,
}

impl CommentSpawner<'_, '_> {
    /// Spawn one comment and return its id.
    ///
    /// `text` overrides the sampled content. The comment starts at the
    /// right edge of the viewport with the configured width estimate.
    pub fn spawn(&mut self, text: Option<String>) -> u64 {
        let text = match text {
            Some(text) => strip_nul(&text),
            None => strip_nul(self.content.sample(&mut self.rng.0)),
        };
        let color = self.palette.sample(&mut self.rng.0);
        let (font_min, font_max) = self.config.font_size;
        let font_size = self.rng.range_f32(font_min, font_max);
        let (crossing_min, crossing_max) = self.config.crossing_secs;
        let crossing = self.rng.range_f32(crossing_min, crossing_max);

        let choice = self.lanes.pick_lane(&mut self.rng.0);
        let lane = choice.lane();
        self.lanes.claim(lane);

        let viewport = self.viewport.effective();
        let width = viewport.w as f32;
        let lane_height = viewport.h as f32 / self.lanes.lane_count() as f32;
        let top = lane as f32 * lane_height + self.config.lane_padding;

        let id = self.index.next_id();
        if choice.is_shared() {
            warn!("All {} lanes occupied, comment {} shares lane {}", self.lanes.lane_count(), id, lane);
        } else {
            debug!("Comment {} spawned on lane {}: '{}'", id, lane, text);
        }

        let entity = self
            .commands
            .spawn((
                Comment::new(id, lane),
                CommentText::new(text, font_size, color, self.config.estimated_width),
                ScreenPosition::new(width, top),
                Scroll::crossing(width, crossing),
            ))
            .id();
        self.index.insert(id, entity);
        self.messages.write(CommentMessage::Spawned {
            id,
            lane,
            shared: choice.is_shared(),
        });
        id
    }

    /// Random delay before the next spawn, in milliseconds.
    fn next_delay(&mut self) -> f64 {
        let (min, max) = self.config.spawn_interval_ms;
        self.rng.range_f64(min, max).max(MIN_SPAWN_DELAY_MS)
    }

    fn max_delay(&self) -> f64 {
        self.config.spawn_interval_ms.1.max(MIN_SPAWN_DELAY_MS)
    }
}

/// Fire the spawn chain when its pending firing is due.
///
/// The next firing is scheduled relative to the previous due time, so the
/// chain keeps its rhythm across frames. When the host stalled for longer
/// than the longest interval the chain restarts from `now` instead of
/// replaying every missed firing at once.
pub fn spawn_timer_system(
    time: Res<WorldTime>,
    mut timer: ResMut<SpawnTimer>,
    mut spawner: CommentSpawner,
) {
    let now = time.now;
    while let Some(due) = timer.next_at() {
        if due > now {
            break;
        }
        spawner.spawn(None);
        timer.fired += 1;

        let anchor = if now - due > spawner.max_delay() {
            now
        } else {
            due
        };
        let next = anchor + spawner.next_delay();
        timer.schedule(next);
        if next <= due {
            // Delay lost to float precision at this magnitude; one firing per frame.
            warn!("Spawn delay absorbed at timestamp {}, not catching up", due);
            break;
        }
    }
}

/// Spawn every non-blank text waiting in the comment feed.
pub fn poll_comment_feed(feed: Option<Res<CommentFeed>>, mut spawner: CommentSpawner) {
    let Some(feed) = feed else {
        return;
    };
    for text in feed.rx.try_iter() {
        let text = strip_nul(&text);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        spawner.spawn(Some(text.to_string()));
    }
}

/// Drop NUL characters, which no C string based renderer can take.
fn strip_nul(text: &str) -> String {
    text.chars().filter(|c| *c != '\0').collect()
}

