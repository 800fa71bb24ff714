//! Horizontal scroll speed component.
//!
//! Comments only travel leftward at a constant speed, so this replaces a
//! general velocity vector with a single scalar. The movement system
//! subtracts `speed × elapsed` from the comment's `x`.

use bevy_ecs::prelude::Component;

/// Leftward speed in pixels per second.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Scroll {
    pub speed: f32,
}

impl Scroll {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Speed that crosses `distance` pixels in `seconds`.
    pub fn crossing(distance: f32, seconds: f32) -> Self {
        Self {
            speed: distance / seconds.max(f32::EPSILON),
        }
    }

    /// Horizontal displacement over `elapsed_ms` milliseconds.
    pub fn displacement(&self, elapsed_ms: f32) -> f32 {
        self.speed * elapsed_ms / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_speed() {
        let scroll = Scroll::crossing(800.0, 8.0);
        assert!((scroll.speed - 100.0).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_does_not_divide_by_zero() {
        let scroll = Scroll::crossing(800.0, 0.0);
        assert!(scroll.speed.is_finite());
    }

    #[test]
    fn displacement_uses_milliseconds() {
        let scroll = Scroll::new(100.0);
        assert!((scroll.displacement(500.0) - 50.0).abs() < 1e-6);
    }
}
