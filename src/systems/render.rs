//! Raylib rendering of the comment snapshot.
//!
//! [`CommentFont`] owns the font used both to draw comments and to measure
//! them, so measured widths match what ends up on screen. Without a
//! configured font, raylib's built-in font is used for both.

use std::ffi::CString;
use std::path::Path;

use log::{info, warn};
use raylib::ffi;
use raylib::prelude::*;

use crate::engine::CommentView;
use crate::resources::lanes::LaneOccupancy;
use crate::systems::commentwidth::TextMeasure;

const TEXT_SPACING: f32 = 1.0;
const OUTLINE_OFFSET: f32 = 1.5;
const OUTLINE_COLOR: Color = Color::new(0, 0, 0, 200);

pub struct CommentFont {
    font: Option<Font>,
}

impl CommentFont {
    /// Load the TTF at `path` with glyphs for `glyphs`, or fall back to
    /// raylib's default font.
    pub fn load(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        path: Option<&Path>,
        glyphs: &str,
    ) -> Self {
        let Some(path) = path else {
            return Self { font: None };
        };
        let Some(path_str) = path.to_str() else {
            warn!("Font path {:?} is not valid UTF-8, using default font", path);
            return Self { font: None };
        };
        match rl.load_font_ex(thread, path_str, 48, Some(glyphs)) {
            Ok(font) => {
                info!("Loaded font {}", path.display());
                Self { font: Some(font) }
            }
            Err(e) => {
                warn!("Failed to load font {}: {}, using default font", path.display(), e);
                Self { font: None }
            }
        }
    }

    fn draw_text(&self, d: &mut RaylibDrawHandle, text: &str, x: f32, y: f32, size: f32, color: Color) {
        match &self.font {
            Some(font) => {
                d.draw_text_ex(font, text, Vector2::new(x, y), size, TEXT_SPACING, color);
            }
            None => d.draw_text(text, x as i32, y as i32, size as i32, color),
        }
    }
}

impl TextMeasure for CommentFont {
    fn measure(&self, text: &str, font_size: f32) -> Option<f32> {
        let c_text = CString::new(text).ok()?;
        let width = match &self.font {
            Some(font) => unsafe {
                ffi::MeasureTextEx(**font, c_text.as_ptr(), font_size, TEXT_SPACING).x
            },
            None => unsafe { ffi::MeasureText(c_text.as_ptr(), font_size as i32) as f32 },
        };
        Some(width)
    }
}

/// Draw every comment at its current position.
pub fn render_comments(
    d: &mut RaylibDrawHandle,
    font: &CommentFont,
    comments: &[CommentView],
    outline: bool,
) {
    for comment in comments {
        if outline {
            for (dx, dy) in [
                (-OUTLINE_OFFSET, 0.0),
                (OUTLINE_OFFSET, 0.0),
                (0.0, -OUTLINE_OFFSET),
                (0.0, OUTLINE_OFFSET),
            ] {
                font.draw_text(
                    d,
                    &comment.text,
                    comment.x + dx,
                    comment.top + dy,
                    comment.font_size,
                    OUTLINE_COLOR,
                );
            }
        }
        font.draw_text(
            d,
            &comment.text,
            comment.x,
            comment.top,
            comment.font_size,
            comment.color,
        );
    }
}

/// Lane occupancy bars and counters, drawn while debug mode is on.
pub fn render_debug_ui(
    d: &mut RaylibDrawHandle,
    lanes: &LaneOccupancy,
    viewport_h: i32,
    active: usize,
    updates: u64,
) {
    let lane_count = i32::try_from(lanes.lane_count()).unwrap_or(i32::MAX);
    let lane_h = (viewport_h / lane_count.max(1)).max(1);
    for lane in 0..lanes.lane_count() {
        let color = match lanes.occupants(lane) {
            0 => Color::new(80, 80, 80, 120),
            1 => Color::new(0, 200, 80, 160),
            _ => Color::new(230, 60, 60, 180),
        };
        d.draw_rectangle(0, lane as i32 * lane_h + 1, 6, lane_h - 2, color);
    }

    let fps = d.get_fps();
    let text = format!(
        "DEBUG (F11) | FPS: {} | active: {} | lanes: {}/{} | updates: {}",
        fps,
        active,
        lanes.occupied_count(),
        lanes.lane_count(),
        updates
    );
    d.draw_text(&text, 12, 8, 10, Color::WHITE);
}
