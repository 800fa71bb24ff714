//! Comment width correction.
//!
//! A comment is spawned with an estimated width because its real extent is
//! only known once the host can measure the text. [`measure_pending_widths`]
//! asks a [`TextMeasure`] implementation for every comment that still has an
//! estimate, and [`correct_width`] stores the result.
//!
//! A report equal to the stored width changes nothing and writes no message,
//! so repeated reports of the same value are harmless.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::comment::Comment;
use crate::components::commenttext::CommentText;
use crate::events::comment::CommentMessage;
use crate::resources::commentindex::CommentIndex;

/// Host capability that knows how wide a text renders.
pub trait TextMeasure {
    /// Width in pixels of `text` at `font_size`, or `None` when unknown.
    fn measure(&self, text: &str, font_size: f32) -> Option<f32>;
}

/// Font-free approximation: ASCII glyphs take `narrow_ratio` of the font
/// size, everything else (CJK, emoji) a full em.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedTextMeasure {
    pub narrow_ratio: f32,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self { narrow_ratio: 0.55 }
    }
}

impl TextMeasure for EstimatedTextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Option<f32> {
        let ems: f32 = text
            .chars()
            .map(|c| if c.is_ascii() { self.narrow_ratio } else { 1.0 })
            .sum();
        Some(ems * font_size)
    }
}

/// Store a measured `width` for comment `id`.
///
/// Returns true when the stored width changed, in which case a
/// [`CommentMessage::WidthCorrected`] is written. Reports for retired
/// comments and invalid widths are ignored.
pub fn correct_width(world: &mut World, id: u64, width: f32) -> bool {
    if !width.is_finite() || width < 0.0 {
        warn!("Ignoring width {} reported for comment {}", width, id);
        return false;
    }
    let Some(entity) = world.resource::<CommentIndex>().get(id) else {
        debug!("Width report for comment {} which is no longer active", id);
        return false;
    };
    let Some(mut text) = world.get_mut::<CommentText>(entity) else {
        return false;
    };
    // Equal reports only set the flag, without marking the component changed
    let changed = if text.width == width {
        text.bypass_change_detection().measured = true;
        false
    } else {
        text.set_measured_width(width)
    };
    if changed {
        debug!("Comment {} width corrected to {}", id, width);
        world
            .resource_mut::<Messages<CommentMessage>>()
            .write(CommentMessage::WidthCorrected { id, width });
    }
    changed
}

/// Measure every comment whose width is still an estimate.
///
/// Returns how many widths changed. A comment the measurer cannot handle
/// keeps its estimate and is not asked about again.
pub fn measure_pending_widths(world: &mut World, measure: &dyn TextMeasure) -> usize {
    let pending: Vec<(Entity, u64, String, f32)> = {
        let mut query = world.query::<(Entity, &Comment, &CommentText)>();
        query
            .iter(world)
            .filter(|(_, _, text)| !text.measured)
            .map(|(entity, comment, text)| {
                (entity, comment.id, text.content.clone(), text.font_size)
            })
            .collect()
    };

    let mut changed = 0;
    for (entity, id, content, font_size) in pending {
        match measure.measure(&content, font_size) {
            Some(width) => {
                if correct_width(world, id, width) {
                    changed += 1;
                }
            }
            None => {
                debug!("Comment {} cannot be measured, keeping the estimate", id);
                if let Some(mut text) = world.get_mut::<CommentText>(entity) {
                    text.bypass_change_detection().measured = true;
                }
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Color;
    use std::cell::Cell;

    #[test]
    fn estimate_counts_wide_glyphs_as_full_em() {
        let measure = EstimatedTextMeasure::default();
        let ascii = measure.measure("ab", 20.0).unwrap();
        let cjk = measure.measure("弹幕", 20.0).unwrap();
        assert!((ascii - 22.0).abs() < 1e-4);
        assert!((cjk - 40.0).abs() < 1e-4);
    }

    #[test]
    fn empty_text_is_zero_wide() {
        let measure = EstimatedTextMeasure::default();
        assert_eq!(measure.measure("", 16.0), Some(0.0));
    }

    /// Measurer that knows nothing and counts how often it was asked.
    struct BlindMeasure {
        asked: Cell<usize>,
    }

    impl TextMeasure for BlindMeasure {
        fn measure(&self, _text: &str, _font_size: f32) -> Option<f32> {
            self.asked.set(self.asked.get() + 1);
            None
        }
    }

    fn world_with_comment(width: f32) -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Messages<CommentMessage>>();
        world.init_resource::<CommentIndex>();
        let entity = world
            .spawn((
                Comment::new(1, 0),
                CommentText::new("a\0b", 16.0, Color::WHITE, width),
            ))
            .id();
        world.resource_mut::<CommentIndex>().insert(1, entity);
        (world, entity)
    }

    #[test]
    fn unmeasurable_text_keeps_estimate_and_is_asked_once() {
        let (mut world, entity) = world_with_comment(200.0);
        let blind = BlindMeasure { asked: Cell::new(0) };

        assert_eq!(measure_pending_widths(&mut world, &blind), 0);
        assert_eq!(measure_pending_widths(&mut world, &blind), 0);
        assert_eq!(blind.asked.get(), 1);

        let text = world.get::<CommentText>(entity).unwrap();
        assert!(text.measured);
        assert_eq!(text.width, 200.0);
    }

    #[test]
    fn equal_report_marks_measured_without_a_message() {
        let (mut world, entity) = world_with_comment(200.0);
        assert!(!correct_width(&mut world, 1, 200.0));
        assert!(world.get::<CommentText>(entity).unwrap().measured);
        assert_eq!(world.resource_mut::<Messages<CommentMessage>>().drain().count(), 0);
    }
}
