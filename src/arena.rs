//! Simulation bounds.
//!
//! The arena is the drawing surface extent in surface units, with the origin
//! at the top-left corner and y growing downward (canvas convention). It is
//! plain read-only data every component receives by reference; the host
//! swaps in a new one on resize.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `point` lies within the arena grown by `margin` on every
    /// side. A negative margin shrinks the accepted region instead.
    #[inline]
    pub fn contains_with_margin(&self, point: Vec2, margin: Vec2) -> bool {
        point.x >= -margin.x
            && point.x <= self.width + margin.x
            && point.y >= -margin.y
            && point.y <= self.height + margin.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_contains_with_margin() {
        let arena = Arena::new(800.0, 600.0);

        assert!(arena.contains_with_margin(Vec2::new(400.0, 300.0), Vec2::ZERO));
        assert!(arena.contains_with_margin(Vec2::new(0.0, 0.0), Vec2::ZERO));
        assert!(!arena.contains_with_margin(Vec2::new(-1.0, 300.0), Vec2::ZERO));

        let margin = Vec2::splat(50.0);
        assert!(arena.contains_with_margin(Vec2::new(-49.0, -49.0), margin));
        assert!(arena.contains_with_margin(Vec2::new(849.0, 649.0), margin));
        assert!(!arena.contains_with_margin(Vec2::new(-51.0, 300.0), margin));

        // Negative margin shrinks the region.
        let inset = Vec2::splat(-10.0);
        assert!(!arena.contains_with_margin(Vec2::new(5.0, 300.0), inset));
        assert!(arena.contains_with_margin(Vec2::new(20.0, 300.0), inset));
    }
}
