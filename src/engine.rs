//! Danmu engine.
//!
//! [`DanmuEngine`] owns the ECS world holding the active comments and the
//! frame schedule that drives them. The host calls [`DanmuEngine::frame`]
//! once per display frame with a millisecond timestamp; the engine decides
//! itself whether a spawn is due and whether a motion update is due.
//!
//! # Frame
//!
//! 1. Advance the comment message queue
//! 2. Spawn comments waiting in the feed
//! 3. Fire the spawn chain if due
//! 4. Move and retire comments if the update interval elapsed
//!
//! Rendering is pull-based: the host reads [`DanmuEngine::snapshot`] and
//! draws it however it likes.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use log::{info, warn};
use raylib::prelude::Color;
use serde::{Serialize, Serializer};

use crate::components::comment::Comment;
use crate::components::commenttext::CommentText;
use crate::components::screenposition::ScreenPosition;
use crate::events::comment::CommentMessage;
use crate::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use crate::resources::commentindex::CommentIndex;
use crate::resources::content::ContentSource;
use crate::resources::danmuconfig::DanmuConfig;
use crate::resources::debugmode::DebugMode;
use crate::resources::enginestate::{EngineState, EngineStates};
use crate::resources::feed::CommentFeed;
use crate::resources::lanes::LaneOccupancy;
use crate::resources::spawntimer::{DanmuRng, SpawnTimer};
use crate::resources::viewport::{ScreenSize, Viewport};
use crate::resources::worldtime::WorldTime;
use crate::systems::commentwidth::{TextMeasure, correct_width, measure_pending_widths};
use crate::systems::messages::update_comment_messages;
use crate::systems::movement::motion_system;
use crate::systems::spawner::{CommentSpawner, poll_comment_feed, spawn_timer_system};
use crate::systems::time::{motion_tick_due, update_world_time};

/// Renderable state of one active comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: u64,
    pub lane: usize,
    pub text: String,
    pub x: f32,
    pub top: f32,
    #[serde(serialize_with = "serialize_color")]
    pub color: Color,
    pub font_size: f32,
    pub width: f32,
}

fn serialize_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!(
        "#{:02X}{:02X}{:02X}{:02X}",
        color.r, color.g, color.b, color.a
    ))
}

pub struct DanmuEngine {
    world: World,
    frame_schedule: Schedule,
}

impl DanmuEngine {
    /// Build a stopped engine. Call [`DanmuEngine::start`] to begin spawning.
    pub fn new(mut config: DanmuConfig, content: ContentSource) -> Self {
        config.sanitize();

        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_update_rate(config.update_rate));
        world.insert_resource(LaneOccupancy::new(config.lanes));
        world.insert_resource(Viewport::default());
        world.insert_resource(config.palette.clone());
        world.insert_resource(content);
        world.insert_resource(CommentIndex::default());
        world.insert_resource(SpawnTimer::default());
        world.insert_resource(DanmuRng::default());
        world.insert_resource(EngineState::new());
        world.insert_resource(Messages::<CommentMessage>::default());
        world.insert_resource(config);
        world.spawn(Observer::new(switch_debug_observer));
        world.flush();

        let mut frame_schedule = Schedule::default();
        frame_schedule.add_systems(
            (
                update_comment_messages,
                poll_comment_feed,
                spawn_timer_system,
                motion_system.run_if(motion_tick_due),
            )
                .chain(),
        );

        Self {
            world,
            frame_schedule,
        }
    }

    /// Replace the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.world.insert_resource(DanmuRng::with_seed(seed));
        self
    }

    /// Start spawning and moving comments from timestamp `now`.
    ///
    /// Comments and lane claims left over from a previous run are
    /// discarded. The first comment spawns on the first frame.
    pub fn start(&mut self, now: f64) {
        if !now.is_finite() {
            warn!("Cannot start at non-finite timestamp {}", now);
            return;
        }
        let leftovers: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Comment>>()
            .iter(&self.world)
            .collect();
        for entity in leftovers {
            self.world.despawn(entity);
        }
        self.world.resource_mut::<LaneOccupancy>().clear();
        self.world.resource_mut::<CommentIndex>().clear();
        self.world.resource_mut::<WorldTime>().anchor(now);
        self.world.resource_mut::<SpawnTimer>().schedule(now);
        self.world
            .resource_mut::<EngineState>()
            .set(EngineStates::Running);
        info!(
            "Danmu engine started with {} lanes",
            self.world.resource::<LaneOccupancy>().lane_count()
        );
    }

    /// Stop spawning and moving. Pending spawns are cancelled and the
    /// comment feed is closed; the current comments stay where they are.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.world
            .resource_mut::<EngineState>()
            .set(EngineStates::Stopped);
        self.world.resource_mut::<SpawnTimer>().cancel();
        self.world.remove_resource::<CommentFeed>();
        info!("Danmu engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.world.resource::<EngineState>().is_running()
    }

    /// Host frame callback. Returns true when a motion update happened.
    pub fn frame(&mut self, now: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        if !now.is_finite() {
            warn!("Ignoring non-finite frame timestamp {}", now);
            return false;
        }
        let updates_before = self.world.resource::<WorldTime>().updates;
        update_world_time(&mut self.world, now);
        self.frame_schedule.run(&mut self.world);
        self.world.clear_trackers();
        self.world.resource::<WorldTime>().updates != updates_before
    }

    /// Spawn a comment right away, outside the spawn chain.
    ///
    /// `text` overrides the sampled content. Returns `None` when stopped.
    pub fn spawn(&mut self, text: Option<String>) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        let mut state: SystemState<CommentSpawner> = SystemState::new(&mut self.world);
        let id = state.get_mut(&mut self.world).spawn(text);
        state.apply(&mut self.world);
        Some(id)
    }

    /// Report the viewport size; `None` when it is unavailable.
    pub fn set_viewport(&mut self, size: Option<(i32, i32)>) {
        self.world
            .resource_mut::<Viewport>()
            .report(size.map(|(w, h)| ScreenSize { w, h }));
    }

    /// Size used for new comments.
    pub fn viewport(&self) -> ScreenSize {
        self.world.resource::<Viewport>().effective()
    }

    /// Store a measured width; see [`correct_width`].
    pub fn correct_width(&mut self, id: u64, width: f32) -> bool {
        correct_width(&mut self.world, id, width)
    }

    /// Measure all comments that still carry an estimated width.
    pub fn measure_widths(&mut self, measure: &dyn TextMeasure) -> usize {
        measure_pending_widths(&mut self.world, measure)
    }

    /// Route texts from `feed` into the spawner, replacing any previous feed.
    pub fn attach_feed(&mut self, feed: CommentFeed) {
        self.world.insert_resource(feed);
    }

    /// Active comments in spawn order.
    pub fn snapshot(&mut self) -> Vec<CommentView> {
        let mut query = self
            .world
            .query::<(&Comment, &CommentText, &ScreenPosition)>();
        let mut views: Vec<CommentView> = query
            .iter(&self.world)
            .map(|(comment, text, position)| CommentView {
                id: comment.id,
                lane: comment.lane,
                text: text.content.clone(),
                x: position.x(),
                top: position.y(),
                color: text.color,
                font_size: text.font_size,
                width: text.width,
            })
            .collect();
        views.sort_unstable_by_key(|view| view.id);
        views
    }

    /// Number of active comments.
    pub fn active_count(&self) -> usize {
        self.world.resource::<CommentIndex>().len()
    }

    pub fn lanes(&self) -> &LaneOccupancy {
        self.world.resource::<LaneOccupancy>()
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    /// Number of spawn-chain firings so far.
    pub fn spawn_firings(&self) -> u64 {
        self.world.resource::<SpawnTimer>().fired
    }

    /// Timestamp of the pending spawn-chain firing, if any.
    pub fn next_spawn_at(&self) -> Option<f64> {
        self.world.resource::<SpawnTimer>().next_at()
    }

    /// Take every unread comment message.
    pub fn drain_messages(&mut self) -> Vec<CommentMessage> {
        self.world
            .resource_mut::<Messages<CommentMessage>>()
            .drain()
            .collect()
    }

    pub fn toggle_debug(&mut self) {
        self.world.trigger(SwitchDebugEvent {});
    }

    pub fn debug_enabled(&self) -> bool {
        self.world.contains_resource::<DebugMode>()
    }

    pub fn config(&self) -> &DanmuConfig {
        self.world.resource::<DanmuConfig>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
