//! External comment feed.
//!
//! Texts sent through the channel are spawned on the next frame, through
//! the same path as the spawner's own comments. [`spawn_stdin_feed`] runs a
//! reader thread that sends one comment per input line.

use std::io::BufRead;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info};

/// Receiving end of the comment feed.
#[derive(Resource)]
pub struct CommentFeed {
    /// Texts waiting to be spawned.
    pub rx: Receiver<String>,
}

impl CommentFeed {
    /// Create a feed and the sender that writes into it.
    pub fn channel() -> (Sender<String>, CommentFeed) {
        let (tx, rx) = unbounded::<String>();
        (tx, CommentFeed { rx })
    }
}

/// Spawn a thread that forwards standard input lines into a new feed.
///
/// The thread ends at end of input or once the feed has been dropped.
pub fn spawn_stdin_feed() -> CommentFeed {
    let (tx, feed) = CommentFeed::channel();
    std::thread::spawn(move || {
        info!("[feed] reading comments from stdin");
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                debug!("[feed] engine dropped the feed, stopping");
                break;
            }
        }
        debug!("[feed] stdin closed");
    });
    feed
}
