use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Debug)]
/// Text payload and rendered extent of a comment.
pub struct CommentText {
    /// The text content to render.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Color of the text.
    pub color: Color,
    /// Rendered width in pixels; an estimate until `measured` is set.
    pub width: f32,
    /// Whether `width` came from a real measurement.
    pub measured: bool,
}

impl CommentText {
    /// Creates a comment text with an estimated width.
    pub fn new(content: impl Into<String>, font_size: f32, color: Color, estimated_width: f32) -> Self {
        Self {
            content: content.into(),
            font_size,
            color,
            width: estimated_width,
            measured: false,
        }
    }

    /// Store a measured width. Returns false when it equals the stored one.
    pub fn set_measured_width(&mut self, width: f32) -> bool {
        self.measured = true;
        if self.width == width {
            return false;
        }
        self.width = width;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_estimate() {
        let text = CommentText::new("hi", 16.0, Color::WHITE, 200.0);
        assert_eq!(text.width, 200.0);
        assert!(!text.measured);
    }

    #[test]
    fn equal_width_is_not_a_change() {
        let mut text = CommentText::new("hi", 16.0, Color::WHITE, 200.0);
        assert!(text.set_measured_width(48.0));
        assert!(!text.set_measured_width(48.0));
        assert_eq!(text.width, 48.0);
        assert!(text.measured);
    }

    #[test]
    fn estimate_equal_to_measurement_still_marks_measured() {
        let mut text = CommentText::new("hi", 16.0, Color::WHITE, 200.0);
        assert!(!text.set_measured_width(200.0));
        assert!(text.measured);
    }
}
