//! Overlay configuration resource.
//!
//! Manages overlay settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! vsync = true
//! transparent = true
//! click_through = true
//! topmost = true
//! font = ./assets/fonts/NotoSansSC-Bold.ttf
//! outline = true
//!
//! [danmu]
//! lanes = 10
//! update_rate = 30
//! spawn_interval_min_ms = 500
//! spawn_interval_max_ms = 2000
//! crossing_min_secs = 8
//! crossing_max_secs = 20
//! font_size_min = 14
//! font_size_max = 22
//! estimated_width = 200
//! lane_padding = 4
//! palette = FFFFFF, FF6B6B, 4ECDC4
//! comments = ./comments.json
//! ```
//!
//! Palette entries are written without `#`, which the INI parser treats as a
//! comment marker.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::content::Palette;
use crate::resources::lanes::{DEFAULT_LANE_COUNT, MAX_LANE_COUNT};
use crate::resources::worldtime::DEFAULT_UPDATE_RATE;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_TRANSPARENT: bool = true;
const DEFAULT_CLICK_THROUGH: bool = true;
const DEFAULT_TOPMOST: bool = true;
const DEFAULT_OUTLINE: bool = true;
const DEFAULT_SPAWN_INTERVAL_MS: (f64, f64) = (500.0, 2000.0);
const DEFAULT_CROSSING_SECS: (f32, f32) = (8.0, 20.0);
const DEFAULT_FONT_SIZE: (f32, f32) = (14.0, 22.0);
const DEFAULT_ESTIMATED_WIDTH: f32 = 200.0;
const DEFAULT_LANE_PADDING: f32 = 4.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
/// Largest window side accepted from the config, in pixels.
const MAX_WINDOW_DIMENSION: u32 = 16384;

/// Overlay configuration resource.
///
/// Window options are read by the host when it opens the overlay; the
/// `[danmu]` options drive the spawner and motion engine.
#[derive(Resource, Debug, Clone)]
pub struct DanmuConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target display frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Transparent framebuffer.
    pub transparent: bool,
    /// Let mouse input pass through the overlay.
    pub click_through: bool,
    /// Keep the overlay above other windows.
    pub topmost: bool,
    /// Optional TTF font; raylib's default font when unset.
    pub font: Option<PathBuf>,
    /// Draw a dark outline around comment text.
    pub outline: bool,
    /// Number of lanes.
    pub lanes: usize,
    /// Logical motion updates per second.
    pub update_rate: u32,
    /// Delay between spawns, milliseconds (min, max).
    pub spawn_interval_ms: (f64, f64),
    /// Time for a comment to cross the viewport, seconds (min, max).
    pub crossing_secs: (f32, f32),
    /// Font size range in pixels (min, max).
    pub font_size: (f32, f32),
    /// Width assumed before the text has been measured.
    pub estimated_width: f32,
    /// Offset from a lane's top edge to its comment.
    pub lane_padding: f32,
    /// Comment colours.
    pub palette: Palette,
    /// Optional JSON file with comment texts.
    pub comments: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for DanmuConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DanmuConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            transparent: DEFAULT_TRANSPARENT,
            click_through: DEFAULT_CLICK_THROUGH,
            topmost: DEFAULT_TOPMOST,
            font: None,
            outline: DEFAULT_OUTLINE,
            lanes: DEFAULT_LANE_COUNT,
            update_rate: DEFAULT_UPDATE_RATE,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            crossing_secs: DEFAULT_CROSSING_SECS,
            font_size: DEFAULT_FONT_SIZE,
            estimated_width: DEFAULT_ESTIMATED_WIDTH,
            lane_padding: DEFAULT_LANE_PADDING,
            palette: Palette::default(),
            comments: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();
        let boolean = |section: &str, key: &str| config.getbool(section, key).ok().flatten();

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = boolean("window", "vsync") {
            self.vsync = vsync;
        }
        if let Some(transparent) = boolean("window", "transparent") {
            self.transparent = transparent;
        }
        if let Some(click_through) = boolean("window", "click_through") {
            self.click_through = click_through;
        }
        if let Some(topmost) = boolean("window", "topmost") {
            self.topmost = topmost;
        }
        if let Some(outline) = boolean("window", "outline") {
            self.outline = outline;
        }
        if let Some(font) = config.get("window", "font").filter(|f| !f.trim().is_empty()) {
            self.font = Some(PathBuf::from(font.trim()));
        }

        // [danmu] section
        if let Some(lanes) = uint("danmu", "lanes") {
            self.lanes = lanes as usize;
        }
        if let Some(rate) = uint("danmu", "update_rate") {
            self.update_rate = rate as u32;
        }
        if let Some(min) = float("danmu", "spawn_interval_min_ms") {
            self.spawn_interval_ms.0 = min;
        }
        if let Some(max) = float("danmu", "spawn_interval_max_ms") {
            self.spawn_interval_ms.1 = max;
        }
        if let Some(min) = float("danmu", "crossing_min_secs") {
            self.crossing_secs.0 = min as f32;
        }
        if let Some(max) = float("danmu", "crossing_max_secs") {
            self.crossing_secs.1 = max as f32;
        }
        if let Some(min) = float("danmu", "font_size_min") {
            self.font_size.0 = min as f32;
        }
        if let Some(max) = float("danmu", "font_size_max") {
            self.font_size.1 = max as f32;
        }
        if let Some(width) = float("danmu", "estimated_width") {
            self.estimated_width = width as f32;
        }
        if let Some(padding) = float("danmu", "lane_padding") {
            self.lane_padding = padding as f32;
        }
        if let Some(list) = config.get("danmu", "palette") {
            match Palette::parse_list(&list) {
                Ok(palette) => self.palette = palette,
                Err(e) => warn!("Ignoring palette from config: {}", e),
            }
        }
        if let Some(comments) = config.get("danmu", "comments").filter(|c| !c.trim().is_empty()) {
            self.comments = Some(PathBuf::from(comments.trim()));
        }

        self.sanitize();

        info!(
            "Loaded config: {}x{} window, fps={}, {} lanes at {} updates/s, spawn every {}-{}ms, crossing {}-{}s",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.lanes,
            self.update_rate,
            self.spawn_interval_ms.0,
            self.spawn_interval_ms.1,
            self.crossing_secs.0,
            self.crossing_secs.1
        );
    }

    /// Repair values that would break the simulation.
    pub fn sanitize(&mut self) {
        for (name, value, default) in [
            ("width", &mut self.window_width, DEFAULT_WINDOW_WIDTH),
            ("height", &mut self.window_height, DEFAULT_WINDOW_HEIGHT),
        ] {
            if *value == 0 || *value > MAX_WINDOW_DIMENSION {
                warn!("window {} = {} is invalid, using {}", name, value, default);
                *value = default;
            }
        }
        if self.lanes == 0 {
            warn!("lanes = 0 is invalid, using 1");
            self.lanes = 1;
        }
        // Every lane needs at least one pixel row
        let max_lanes = MAX_LANE_COUNT.min(self.window_height as usize);
        if self.lanes > max_lanes {
            warn!("lanes = {} is too many, using {}", self.lanes, max_lanes);
            self.lanes = max_lanes;
        }
        if self.update_rate == 0 {
            warn!("update_rate = 0 is invalid, using {}", DEFAULT_UPDATE_RATE);
            self.update_rate = DEFAULT_UPDATE_RATE;
        }
        if !(self.estimated_width.is_finite() && self.estimated_width >= 0.0) {
            warn!("estimated_width {} is invalid, using default", self.estimated_width);
            self.estimated_width = DEFAULT_ESTIMATED_WIDTH;
        }
        sanitize_range(
            "spawn interval",
            &mut self.spawn_interval_ms,
            0.0,
            DEFAULT_SPAWN_INTERVAL_MS,
        );
        sanitize_range(
            "crossing duration",
            &mut self.crossing_secs,
            f32::EPSILON,
            DEFAULT_CROSSING_SECS,
        );
        sanitize_range("font size", &mut self.font_size, 1.0, DEFAULT_FONT_SIZE);
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "transparent", Some(self.transparent.to_string()));
        config.set("window", "click_through", Some(self.click_through.to_string()));
        config.set("window", "topmost", Some(self.topmost.to_string()));
        config.set("window", "outline", Some(self.outline.to_string()));
        if let Some(font) = &self.font {
            config.set("window", "font", Some(font.display().to_string()));
        }

        // [danmu] section
        config.set("danmu", "lanes", Some(self.lanes.to_string()));
        config.set("danmu", "update_rate", Some(self.update_rate.to_string()));
        config.set(
            "danmu",
            "spawn_interval_min_ms",
            Some(self.spawn_interval_ms.0.to_string()),
        );
        config.set(
            "danmu",
            "spawn_interval_max_ms",
            Some(self.spawn_interval_ms.1.to_string()),
        );
        config.set("danmu", "crossing_min_secs", Some(self.crossing_secs.0.to_string()));
        config.set("danmu", "crossing_max_secs", Some(self.crossing_secs.1.to_string()));
        config.set("danmu", "font_size_min", Some(self.font_size.0.to_string()));
        config.set("danmu", "font_size_max", Some(self.font_size.1.to_string()));
        config.set("danmu", "estimated_width", Some(self.estimated_width.to_string()));
        config.set("danmu", "lane_padding", Some(self.lane_padding.to_string()));
        config.set("danmu", "palette", Some(self.palette.to_list()));
        if let Some(comments) = &self.comments {
            config.set("danmu", "comments", Some(comments.display().to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

/// Swap reversed bounds and replace non-finite or too-small ones.
fn sanitize_range<T>(name: &str, range: &mut (T, T), floor: T, default: (T, T))
where
    T: Copy + PartialOrd + std::fmt::Display + Into<f64>,
{
    let finite = |v: T| v.into().is_finite();
    if !finite(range.0) || !finite(range.1) || range.0 < floor || range.1 < floor {
        warn!(
            "{} range {}..{} is invalid, using {}..{}",
            name, range.0, range.1, default.0, default.1
        );
        *range = default;
        return;
    }
    if range.0 > range.1 {
        warn!("{} range {}..{} is reversed, swapping", name, range.0, range.1);
        *range = (range.1, range.0);
    }
}
