//! Danmugo main entry point.
//!
//! A scrolling comment ("danmu") overlay written in Rust using:
//! - **raylib** for the transparent overlay window and text rendering
//! - **bevy_ecs** for the comment simulation
//!
//! Comments spawn at the right edge at random intervals, travel leftward
//! along lanes and disappear once they leave the screen.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the comment list, open the overlay window
//! 2. Start the engine at the current raylib time
//! 3. Every display frame:
//!    - Handle hotkeys (F11 debug overlay, H hide/show) and window resizes
//!    - Let the engine spawn, move and retire comments
//!    - Measure comments that still carry an estimated width
//!    - Draw the snapshot
//! 4. Stop the engine on exit
//!
//! `--simulate SECS` runs the same engine headless on a virtual 60 Hz clock.
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! fortune | cargo run --release -- --stdin
//! cargo run -- --simulate 30 --seed 7 --dump
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, warn};
use raylib::ffi;
use raylib::prelude::*;

use danmugo::engine::DanmuEngine;
use danmugo::events::comment::CommentMessage;
use danmugo::resources::content::ContentSource;
use danmugo::resources::danmuconfig::DanmuConfig;
use danmugo::resources::feed::spawn_stdin_feed;
use danmugo::systems::commentwidth::EstimatedTextMeasure;
use danmugo::systems::render::{CommentFont, render_comments, render_debug_ui};

/// Virtual frame length used by `--simulate`.
const SIMULATED_FRAME_MS: f64 = 1000.0 / 60.0;

/// Danmugo scrolling comment overlay
#[derive(Parser)]
#[command(version, about = "Scrolling comment (danmu) overlay")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON file with comment texts, overrides the config's `comments`.
    #[arg(long, value_name = "PATH")]
    comments: Option<PathBuf>,

    /// Also spawn one comment per line read from standard input.
    #[arg(long)]
    stdin: bool,

    /// Seed for the random source, for reproducible runs.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,

    /// Run headless for SECS simulated seconds instead of opening a window.
    #[arg(long, value_name = "SECS")]
    simulate: Option<f64>,

    /// With --simulate, print the final comments as JSON lines.
    #[arg(long, requires = "simulate")]
    dump: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DanmuConfig::with_path(path),
        None => DanmuConfig::new(),
    };

    // Early-exit: write defaults and quit (no window needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        info!("Default config written to {}", config.config_path.display());
        return;
    }

    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }

    let comments_path = cli.comments.clone().or_else(|| config.comments.clone());
    let content = load_content(comments_path.as_deref());

    let mut engine = DanmuEngine::new(config, content);
    if let Some(seed) = cli.seed {
        engine = engine.with_seed(seed);
    }
    if cli.stdin {
        engine.attach_feed(spawn_stdin_feed());
    }

    match cli.simulate {
        Some(secs) => simulate(engine, secs, cli.dump),
        None => run_overlay(engine),
    }
}

fn load_content(path: Option<&Path>) -> ContentSource {
    let Some(path) = path else {
        return ContentSource::default();
    };
    match ContentSource::load(path) {
        Ok(content) => {
            info!("Loaded {} comments from {}", content.len(), path.display());
            content
        }
        Err(e) => {
            warn!("{}, using built-in comments", e);
            ContentSource::default()
        }
    }
}

/// Drive the engine on a virtual clock and log what happens.
fn simulate(mut engine: DanmuEngine, secs: f64, dump: bool) {
    let (w, h) = engine.config().window_size();
    engine.set_viewport(Some((w as i32, h as i32)));
    let measure = EstimatedTextMeasure::default();

    let end = secs.max(0.0) * 1000.0;
    let mut now = 0.0;
    let mut next_report = 1000.0;
    let (mut spawned, mut retired, mut shared) = (0usize, 0usize, 0usize);

    engine.start(now);
    while now <= end {
        engine.frame(now);
        engine.measure_widths(&measure);
        for message in engine.drain_messages() {
            match message {
                CommentMessage::Spawned { shared: true, .. } => {
                    spawned += 1;
                    shared += 1;
                }
                CommentMessage::Spawned { .. } => spawned += 1,
                CommentMessage::Retired { .. } => retired += 1,
                CommentMessage::WidthCorrected { .. } => {}
            }
        }
        if now >= next_report {
            let lanes = engine.lanes();
            info!(
                "t={:>6.1}s active={:>3} lanes={}/{} spawned={} retired={} shared={}",
                now / 1000.0,
                engine.active_count(),
                lanes.occupied_count(),
                lanes.lane_count(),
                spawned,
                retired,
                shared
            );
            next_report += 1000.0;
        }
        now += SIMULATED_FRAME_MS;
    }
    engine.stop();

    if dump {
        for view in engine.snapshot() {
            match serde_json::to_string(&view) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize comment {}: {}", view.id, e),
            }
        }
    }
}

/// Every distinct character the overlay may draw, for font glyph loading.
fn glyph_set(content: &ContentSource) -> String {
    let mut chars: Vec<char> = (' '..='~')
        .chain(content.texts().iter().flat_map(|t| t.chars()))
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars.into_iter().collect()
}

fn run_overlay(mut engine: DanmuEngine) {
    let config = engine.config().clone();
    let (window_width, window_height) = config.window_size();

    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Danmugo");
    if config.transparent {
        builder.transparent().undecorated();
    }
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();

    unsafe {
        if config.topmost {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_WINDOW_TOPMOST as u32);
        }
        if config.click_through {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_WINDOW_MOUSE_PASSTHROUGH as u32);
        }
    }
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    let glyphs = glyph_set(engine.world().resource::<ContentSource>());
    let font = CommentFont::load(&mut rl, &thread, config.font.as_deref(), &glyphs);
    let background = if config.transparent {
        Color::BLANK
    } else {
        Color::BLACK
    };

    engine.set_viewport(Some((rl.get_screen_width(), rl.get_screen_height())));
    engine.start(rl.get_time() * 1000.0);
    let mut hidden = false;

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_F11) {
            engine.toggle_debug();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_H) {
            hidden = !hidden;
            info!("Comments {}", if hidden { "hidden" } else { "shown" });
        }
        if rl.is_window_resized() {
            engine.set_viewport(Some((rl.get_screen_width(), rl.get_screen_height())));
        }

        engine.frame(rl.get_time() * 1000.0);
        engine.measure_widths(&font);

        let comments = if hidden { Vec::new() } else { engine.snapshot() };
        let debug = engine.debug_enabled();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(background);
        render_comments(&mut d, &font, &comments, config.outline);
        if debug {
            render_debug_ui(
                &mut d,
                engine.lanes(),
                engine.viewport().h,
                engine.active_count(),
                engine.time().updates,
            );
        }
    }
    engine.stop();
}
