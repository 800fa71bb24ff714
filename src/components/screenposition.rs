//! Screen-space position component.
//!
//! A comment's position in overlay pixels. `x` is the left edge of the text
//! and only ever decreases; `y` is the top of the text, derived from the lane
//! once at spawn and never touched again.

use bevy_ecs::prelude::Component;

/// Top-left corner of a comment in screen pixels.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPosition {
    x: f32,
    y: f32,
}

impl ScreenPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move left by `dx` pixels.
    pub fn shift_left(&mut self, dx: f32) {
        self.x -= dx;
    }

    /// Whether a span of `width` pixels starting here still reaches `[0, ∞)`.
    pub fn spans_visible(&self, width: f32) -> bool {
        self.x + width >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_left_keeps_top() {
        let mut pos = ScreenPosition::new(800.0, 64.0);
        pos.shift_left(12.5);
        pos.shift_left(0.0);
        assert_eq!(pos, ScreenPosition::new(787.5, 64.0));
    }

    #[test]
    fn span_touching_left_edge_is_visible() {
        assert!(ScreenPosition::new(-200.0, 0.0).spans_visible(200.0));
        assert!(!ScreenPosition::new(-200.5, 0.0).spans_visible(200.0));
    }

    #[test]
    fn zero_width_span_leaves_once_x_is_negative() {
        assert!(ScreenPosition::default().spans_visible(0.0));
        assert!(!ScreenPosition::new(-0.1, 0.0).spans_visible(0.0));
    }
}
