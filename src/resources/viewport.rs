//! Viewport size resources.
//!
//! The host reports the overlay's pixel size whenever it knows it. Spawning
//! reads the effective size: the reported one, or 800×600 when no size was
//! reported or a reported dimension is not positive.

use bevy_ecs::prelude::Resource;

/// Width assumed when the viewport size is unknown.
pub const DEFAULT_VIEWPORT_WIDTH: i32 = 800;
/// Height assumed when the viewport size is unknown.
pub const DEFAULT_VIEWPORT_HEIGHT: i32 = 600;

/// Size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            w: DEFAULT_VIEWPORT_WIDTH,
            h: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Last size reported by the host, if any.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct Viewport {
    reported: Option<ScreenSize>,
}

impl Viewport {
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            reported: Some(ScreenSize { w, h }),
        }
    }

    /// Replace the reported size; `None` marks the size as unavailable.
    pub fn report(&mut self, size: Option<ScreenSize>) {
        self.reported = size;
    }

    pub fn reported(&self) -> Option<ScreenSize> {
        self.reported
    }

    /// Size to use for spawning, with per-dimension fallback to the defaults.
    pub fn effective(&self) -> ScreenSize {
        let fallback = ScreenSize::default();
        match self.reported {
            Some(size) => ScreenSize {
                w: if size.w > 0 { size.w } else { fallback.w },
                h: if size.h > 0 { size.h } else { fallback.h },
            },
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_viewport_uses_defaults() {
        let viewport = Viewport::default();
        assert_eq!(viewport.effective(), ScreenSize { w: 800, h: 600 });
    }

    #[test]
    fn reported_size_wins() {
        let viewport = Viewport::new(1920, 1080);
        assert_eq!(viewport.effective(), ScreenSize { w: 1920, h: 1080 });
    }

    #[test]
    fn zero_dimension_falls_back_individually() {
        let viewport = Viewport::new(1024, 0);
        assert_eq!(viewport.effective(), ScreenSize { w: 1024, h: 600 });
    }

    #[test]
    fn report_none_forgets_size() {
        let mut viewport = Viewport::new(640, 480);
        viewport.report(None);
        assert!(viewport.reported().is_none());
        assert_eq!(viewport.effective(), ScreenSize::default());
    }
}
